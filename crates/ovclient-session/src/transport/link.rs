//! Link contract between `Transport` and a concrete connection.

use async_trait::async_trait;
use tokio::sync::mpsc;

use ovclient_core::error::Result;

/// Commands from the transport to the socket pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text(String),
    Close,
}

/// Events from the socket pump to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// One text frame, verbatim.
    Frame(String),
    /// Transport-level error. The link may still be usable.
    Error(String),
    /// Link is gone. Always the last event.
    Closed { code: u16, reason: String },
}

/// An open link. Dropping `outbound` makes the pump close the socket.
#[derive(Debug)]
pub struct Link {
    pub outbound: mpsc::UnboundedSender<Outbound>,
    pub inbound: mpsc::UnboundedReceiver<LinkEvent>,
}

/// Opens links to an address.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn open(&self, address: &str) -> Result<Link>;
}
