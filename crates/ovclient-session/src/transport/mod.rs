//! Transport layer (WebSocket client).
//!
//! `Transport` owns at most one link and hands every inbound JSON frame to a
//! single installed handler. Links are opened through the `Connector` seam:
//! `WsConnector` in production, in-memory connectors in tests.

pub mod codec;
pub mod connection;
pub mod link;
pub mod pending;
pub mod ws;

pub use connection::{InboundHandler, LogHandler, Transport};
pub use link::{Connector, Link, LinkEvent, Outbound};
pub use ws::WsConnector;
