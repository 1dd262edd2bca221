//! Envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde_json::{json, Map, Value};

use ovclient_core::error::ErrorKind;
use ovclient_core::protocol::{Request, Response};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_request_login() {
    let req = Request::decode(&load("request_login.json")).unwrap();
    assert_eq!(req.event, "login");
    assert_eq!(req.client_id.as_deref(), Some("c0ffee00-0000-4000-8000-000000000001"));
    assert_eq!(req.parameter["user"], json!("alice"));
    assert_eq!(req.parameter.len(), 2);
}

#[test]
fn request_survives_the_wire() {
    let mut parameter = Map::new();
    parameter.insert("loop".into(), json!("ops-1"));
    parameter.insert("nested".into(), json!({ "b": [1, 2], "a": null }));
    let sent = Request::new("add_recording", parameter).with_client("client-7");

    // the server side sees plain JSON, not our type
    let on_server: Value = serde_json::from_str(&sent.encode().unwrap()).unwrap();
    let echoed = serde_json::to_string(&on_server).unwrap();

    assert_eq!(Request::decode(&echoed).unwrap(), sent);
}

#[test]
fn parse_response_ignores_extra_fields() {
    let env = Response::decode(&load("response_soundcards.json")).unwrap();
    assert_eq!(env.event, "get soundcards");
    assert_eq!(env.uuid.as_deref(), Some("6f1c2a8e-3c55-4a43-9d6e-2b1f0e7a9c11"));
    assert_eq!(env.field("soundcards"), Some(&json!(["A", "B"])));
    assert!(env.error.is_none());
}

#[test]
fn parse_response_error() {
    let env = Response::decode(&load("response_error.json")).unwrap();
    let err = env.error.as_ref().unwrap();
    assert_eq!(err.code, 5000);
    assert_eq!(err.description, "authentication failed");
    assert!(env.payload().is_none());
}

#[test]
fn response_without_event_is_malformed() {
    let err = Response::decode(&load("response_no_event.json")).expect_err("must fail");
    assert_eq!(err.kind().as_str(), ErrorKind::Malformed.as_str());
}
