//! Domain/Project/Role value objects returned by the admin vocabulary.
//!
//! Each type parses from a JSON object plus an optional explicit id. A missing
//! id is a checked failure (`ParseError::MissingId`), and `name` falls back to
//! the id.

mod domain;
mod project;
mod role;

use serde_json::{Map, Value};
use thiserror::Error;

pub use domain::{parse_domains, Domain};
pub use project::{parse_projects, Project};
pub use role::{parse_roles, Role};

/// Model parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{kind}: missing id")]
    MissingId { kind: &'static str },
    #[error("{kind}: expected object")]
    NotAnObject { kind: &'static str },
    #[error("{kind}: expected object or array of entries")]
    NotACollection { kind: &'static str },
}

/// Resolve the id and the backing object shared by every model parser.
fn fields<'a>(
    kind: &'static str,
    id: Option<&'a str>,
    data: &'a Value,
) -> Result<(String, &'a Map<String, Value>), ParseError> {
    let obj = data.as_object().ok_or(ParseError::NotAnObject { kind })?;
    let id = id
        .or_else(|| obj.get("id").and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .ok_or(ParseError::MissingId { kind })?;
    Ok((id.to_string(), obj))
}

fn opt_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Parse a collection given either as `{id: {...}}` or `[{id, ...}]`.
fn parse_collection<T>(
    kind: &'static str,
    data: &Value,
    parse: impl Fn(Option<&str>, &Value) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    match data {
        Value::Object(map) => map.iter().map(|(id, v)| parse(Some(id.as_str()), v)).collect(),
        Value::Array(items) => items.iter().map(|v| parse(None, v)).collect(),
        _ => Err(ParseError::NotACollection { kind }),
    }
}
