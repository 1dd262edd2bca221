//! Request/response envelopes (JSON text frames).
//!
//! Requests are built by the client with a fresh id per call. Responses are
//! decoded leniently: servers add fields (`type`, `request`, ...) that the
//! client does not need.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{OvError, Result};

/// Generate a request id (UUID v4, hyphenated).
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Outbound request envelope.
///
/// On the wire the id is written twice: as `id` and as `uuid`. Servers read
/// `uuid` and echo it back, generating their own when it is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RequestFrame", try_from = "RequestFrame")]
pub struct Request {
    /// Unique per request.
    pub id: String,
    /// Stable client id (field name is `client` in JSON).
    pub client_id: Option<String>,
    /// Operation name.
    pub event: String,
    /// Operation parameters, `{}` when there are none.
    pub parameter: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
struct RequestFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client: Option<String>,
    event: String,
    #[serde(default)]
    parameter: Map<String, Value>,
}

impl From<Request> for RequestFrame {
    fn from(req: Request) -> Self {
        Self {
            uuid: Some(req.id.clone()),
            id: Some(req.id),
            client: req.client_id,
            event: req.event,
            parameter: req.parameter,
        }
    }
}

impl TryFrom<RequestFrame> for Request {
    type Error = String;

    fn try_from(frame: RequestFrame) -> std::result::Result<Self, Self::Error> {
        let id = frame
            .id
            .or(frame.uuid)
            .ok_or_else(|| "missing field `id`".to_string())?;
        Ok(Self {
            id,
            client_id: frame.client,
            event: frame.event,
            parameter: frame.parameter,
        })
    }
}

impl Request {
    pub fn new(event: impl Into<String>, parameter: Map<String, Value>) -> Self {
        Self {
            id: new_request_id(),
            client_id: None,
            event: event.into(),
            parameter,
        }
    }

    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Serialize to the text frame sent on the wire.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| OvError::Internal(format!("encode request failed: {e}")))
    }

    pub fn decode(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| OvError::Malformed(format!("invalid request: {e}")))
    }
}

/// `error` object attached to a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerError {
    pub code: u64,
    #[serde(default)]
    pub description: String,
}

/// Inbound response (or server push) envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Broadcasts carry their payload here instead of `response`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServerError>,
}

impl Response {
    /// Decode from an already-parsed frame.
    pub fn from_value(v: &Value) -> Result<Self> {
        Self::deserialize(v).map_err(|e| OvError::Malformed(format!("invalid envelope: {e}")))
    }

    pub fn decode(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| OvError::Malformed(format!("invalid envelope: {e}")))
    }

    /// `response` if present, else `parameter`.
    pub fn payload(&self) -> Option<&Value> {
        self.response.as_ref().or(self.parameter.as_ref())
    }

    /// Look up a top-level field of the payload.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload().and_then(|p| p.get(key))
    }
}
