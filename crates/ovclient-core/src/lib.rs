//! openvocs client core: wire envelopes, event vocabularies, errors and the
//! Domain/Project/Role value objects.
//!
//! This crate defines the signaling contracts shared by the session layer and
//! its tests. It carries no transport or runtime dependencies so the envelope
//! and model code can be reused against any connection.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed frames
//! and incomplete model data surface as `OvError`/`ParseError` values.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod protocol;

/// Shared result type.
pub use error::{OvError, Result};
