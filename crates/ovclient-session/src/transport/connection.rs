//! Connection-owning transport.
//!
//! Two states only: disconnected (no link handle) and connected. A close from
//! the peer clears the handle so `connect` can open a fresh link. There is no
//! reconnect, no queue while disconnected and no backpressure: `send` either
//! hands the frame to the link immediately or drops it with a warning.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use ovclient_core::error::{OvError, Result};
use ovclient_core::protocol::{Request, Response};

use crate::transport::link::{Connector, LinkEvent, Outbound};
use crate::transport::pending::PendingRequests;

/// Events whose payload never goes to the debug log.
const HIDDEN_EVENTS: [&str; 2] = ["login", "ldap_import"];

pub(crate) fn is_hidden(event: &str) -> bool {
    HIDDEN_EVENTS.contains(&event)
}

/// Receives every decoded inbound frame, in arrival order.
pub trait InboundHandler: Send + Sync {
    fn on_message(&self, msg: Value);
}

/// Default handler: log and drop.
#[derive(Debug)]
pub struct LogHandler {
    transport: String,
}

impl InboundHandler for LogHandler {
    fn on_message(&self, msg: Value) {
        tracing::info!(transport = %self.transport, %msg, "unhandled inbound message");
    }
}

struct LinkHandle {
    outbound: mpsc::UnboundedSender<Outbound>,
    generation: u64,
    reader: JoinHandle<()>,
}

struct Inner {
    name: String,
    connector: Arc<dyn Connector>,
    debug: AtomicBool,
    connecting: AtomicBool,
    generation: AtomicU64,
    link: Mutex<Option<LinkHandle>>,
    handler: RwLock<Arc<dyn InboundHandler>>,
    pending: PendingRequests,
}

impl Inner {
    fn slot(&self) -> MutexGuard<'_, Option<LinkHandle>> {
        self.link.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handler(&self) -> Arc<dyn InboundHandler> {
        let h = self.handler.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*h)
    }

    fn debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    fn deliver(&self, text: &str) {
        let msg: Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(transport = %self.name, error = %e, "malformed inbound frame dropped");
                return;
            }
        };

        if self.debug() {
            match msg.get("event").and_then(Value::as_str) {
                Some(ev) if is_hidden(ev) => {
                    tracing::info!(transport = %self.name, event = ev, "incoming (content hidden)");
                }
                _ => tracing::info!(transport = %self.name, payload = %text, "incoming"),
            }
        }

        self.pending.resolve(&msg);
        self.handler().on_message(msg);
    }

    /// Drop the handle if it still belongs to `generation`.
    fn release(&self, generation: u64) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|l| l.generation == generation) {
            *slot = None;
            drop(slot);
            self.pending.fail_all();
        }
    }
}

/// Resets the in-flight flag even if `connect` is cancelled mid-open.
struct Connecting<'a>(&'a AtomicBool);

impl Drop for Connecting<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drops a pending entry when its waiter goes away, including when the
/// `request` future is cancelled.
struct Waiting<'a> {
    pending: &'a PendingRequests,
    id: &'a str,
}

impl Drop for Waiting<'_> {
    fn drop(&mut self) {
        self.pending.forget(self.id);
    }
}

/// Shared handle to one connection. Clones refer to the same link.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<Inner>,
}

impl Transport {
    pub fn new(name: impl Into<String>, connector: Arc<dyn Connector>) -> Self {
        let name = name.into();
        let handler: Arc<dyn InboundHandler> = Arc::new(LogHandler {
            transport: name.clone(),
        });
        Self {
            inner: Arc::new(Inner {
                name,
                connector,
                debug: AtomicBool::new(false),
                connecting: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                link: Mutex::new(None),
                handler: RwLock::new(handler),
                pending: PendingRequests::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn is_connected(&self) -> bool {
        self.inner.slot().is_some()
    }

    pub fn set_debug(&self, on: bool) {
        self.inner.debug.store(on, Ordering::Relaxed);
    }

    pub fn debug(&self) -> bool {
        self.inner.debug()
    }

    /// Replace the inbound callback. Only one handler is active at a time.
    pub fn set_handler(&self, handler: Arc<dyn InboundHandler>) {
        let mut h = self.inner.handler.write().unwrap_or_else(PoisonError::into_inner);
        *h = handler;
    }

    /// Open a link to `address`. No-op while connected or while another
    /// connect is in flight.
    pub async fn connect(&self, address: &str) -> Result<()> {
        let name = &self.inner.name;
        if self.is_connected() {
            tracing::info!(transport = %name, address, "already connected");
            return Ok(());
        }
        if self.inner.connecting.swap(true, Ordering::AcqRel) {
            tracing::info!(transport = %name, address, "connect already in progress");
            return Ok(());
        }
        let guard = Connecting(&self.inner.connecting);
        if self.is_connected() {
            tracing::info!(transport = %name, address, "already connected");
            return Ok(());
        }

        tracing::info!(transport = %name, address, "connecting");
        let link = match self.inner.connector.open(address).await {
            Ok(link) => link,
            Err(e) => {
                tracing::error!(transport = %name, address, error = %e, "connect failed");
                return Err(e);
            }
        };

        let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
        {
            // held across spawn so the reader cannot release before the handle exists
            let mut slot = self.inner.slot();
            let reader = tokio::spawn(read_loop(Arc::downgrade(&self.inner), link.inbound, generation));
            *slot = Some(LinkHandle {
                outbound: link.outbound,
                generation,
                reader,
            });
        }
        drop(guard);

        tracing::info!(transport = %name, address, "connected");
        Ok(())
    }

    /// Transmit an already-serialized frame.
    pub fn send(&self, text: String) -> Result<()> {
        self.transmit(text, None)
    }

    /// Encode and transmit a request.
    pub fn send_request(&self, req: &Request) -> Result<()> {
        let text = req.encode()?;
        let hidden = is_hidden(&req.event);
        self.transmit(text, hidden.then_some(req.event.as_str()))
    }

    /// Send `req` and wait for the frame echoing its id as `uuid`.
    ///
    /// The reply still reaches the inbound handler as well.
    pub async fn request(&self, req: &Request, timeout: Duration) -> Result<Response> {
        let rx = self.inner.pending.register(&req.id);
        let _waiting = Waiting {
            pending: &self.inner.pending,
            id: &req.id,
        };
        self.send_request(req)?;

        let msg = match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(msg)) => msg,
            Ok(Err(_)) => return Err(OvError::Disconnected),
            Err(_) => {
                tracing::warn!(transport = %self.inner.name, event = %req.event, id = %req.id, "no response, giving up");
                return Err(OvError::Timeout(req.id.clone()));
            }
        };

        let env = Response::from_value(&msg)?;
        if let Some(err) = env.error {
            return Err(OvError::Server {
                code: err.code,
                description: err.description,
            });
        }
        Ok(env)
    }

    /// Close the link if open. The handle is cleared either way.
    pub fn disconnect(&self) {
        let taken = self.inner.slot().take();
        if let Some(link) = taken {
            tracing::info!(transport = %self.inner.name, "disconnect");
            if !link.outbound.is_closed() {
                let _ = link.outbound.send(Outbound::Close);
            }
            link.reader.abort();
        }
        self.inner.pending.fail_all();
    }

    /// Number of requests still waiting for a reply.
    pub fn pending_requests(&self) -> usize {
        self.inner.pending.len()
    }

    fn transmit(&self, text: String, hidden_event: Option<&str>) -> Result<()> {
        let name = &self.inner.name;
        let slot = self.inner.slot();
        let Some(link) = slot.as_ref() else {
            tracing::warn!(transport = %name, "not connected, message dropped");
            return Err(OvError::NotConnected);
        };

        if self.inner.debug() {
            match hidden_event {
                Some(event) => tracing::info!(transport = %name, event, "outgoing (content hidden)"),
                None => tracing::info!(transport = %name, payload = %text, "outgoing"),
            }
        }

        link.outbound.send(Outbound::Text(text)).map_err(|_| {
            tracing::warn!(transport = %name, "link closed, message dropped");
            OvError::NotConnected
        })
    }
}

/// Holds only a weak reference: dropping the last `Transport` drops the
/// outbound sender, which makes the pump close the socket.
async fn read_loop(
    inner: Weak<Inner>,
    mut inbound: mpsc::UnboundedReceiver<LinkEvent>,
    generation: u64,
) {
    while let Some(event) = inbound.recv().await {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        match event {
            LinkEvent::Frame(text) => inner.deliver(&text),
            LinkEvent::Error(e) => {
                tracing::error!(transport = %inner.name, error = %e, "websocket error");
            }
            LinkEvent::Closed { code, reason } => {
                tracing::info!(transport = %inner.name, code, %reason, "websocket closed");
                break;
            }
        }
    }
    if let Some(inner) = inner.upgrade() {
        inner.release(generation);
    }
}
