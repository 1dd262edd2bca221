//! Signaling protocol modules.
//!
//! - `envelope`: JSON request/response shapes exchanged as text frames.
//! - `event`: the per-feature event vocabularies as enums.
//!
//! Decoding never panics: a frame that is not JSON, or that lacks an `event`
//! field, is reported as `OvError::Malformed`.

pub mod envelope;
pub mod event;

pub use envelope::{new_request_id, Request, Response, ServerError};
pub use event::{AdminEvent, EventSet, GatewayEvent, RecorderEvent};
