#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use ovclient_core::error::ErrorKind;
use ovclient_session::config::{self, Feature};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
endpoints:
  - feature: admin
    address: "ws://localhost/admin"
    debgu: true # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
endpoints:
  - feature: recorder
    address: "ws://localhost:8083/recorder"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.client.name, "vocs");
    assert_eq!(cfg.client.request_timeout_ms, 5000);
    assert!(cfg.client.direction_fallthrough);
    assert_eq!(cfg.endpoints[0].feature, Feature::Recorder);
    assert!(!cfg.endpoints[0].debug(&cfg.client));
}

#[test]
fn endpoint_debug_overrides_client() {
    let ok = r#"
version: 1
client:
  debug: true
endpoints:
  - feature: admin
    address: "wss://vocs.example/admin"
    debug: false
    login: { user: alice, password: secret }
  - feature: alsa_gateway
    address: "ws://10.0.0.1:9000/"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(!cfg.endpoints[0].debug(&cfg.client));
    assert!(cfg.endpoint(Feature::AlsaGateway).unwrap().debug(&cfg.client));

    let login = cfg.endpoints[0].login.as_ref().unwrap();
    assert_eq!(login.user, "alice");
    assert!(!format!("{login:?}").contains("secret"));
}

#[test]
fn unsupported_version() {
    let bad = r#"
version: 2
endpoints:
  - feature: admin
    address: "ws://localhost/admin"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
}

#[test]
fn rejects_invalid_endpoints() {
    let cases = [
        // none at all
        "version: 1\n",
        // not a websocket url
        "version: 1\nendpoints:\n  - { feature: admin, address: \"http://localhost/admin\" }\n",
        "version: 1\nendpoints:\n  - { feature: admin, address: \"ws://\" }\n",
        // duplicate feature
        "version: 1\nendpoints:\n  - { feature: recorder, address: \"ws://a/\" }\n  - { feature: recorder, address: \"ws://b/\" }\n",
        // login outside admin
        "version: 1\nendpoints:\n  - { feature: recorder, address: \"ws://a/\", login: { user: u, password: p } }\n",
        // unknown feature
        "version: 1\nendpoints:\n  - { feature: sip, address: \"ws://a/\" }\n",
        // timeout out of range
        "version: 1\nclient: { request_timeout_ms: 10 }\nendpoints:\n  - { feature: admin, address: \"ws://a/\" }\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.kind(), ErrorKind::BadConfig, "case: {case}");
    }
}
