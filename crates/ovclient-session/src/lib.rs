//! openvocs client session library.
//!
//! This crate wires the transport, the feature adapters and the presentation
//! seam into a client stack. It is consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod adapter;
pub mod client;
pub mod config;
pub mod present;
pub mod transport;
