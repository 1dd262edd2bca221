//! Feature adapters.
//!
//! Every adapter is the same machine with a different vocabulary:
//! - `AdapterCore` binds to a `Transport` and sends fire-and-forget requests
//! - `Dispatch<H>` is the inbound callback; it decodes the envelope, matches
//!   the event enum and falls back to dumping the envelope into the generic
//!   region

pub mod admin;
pub mod gateway;
pub mod recorder;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use ovclient_core::error::{OvError, Result};
use ovclient_core::protocol::{new_request_id, EventSet, Request, Response};

use crate::present::{Presenter, GENERIC_REGION};
use crate::transport::connection::is_hidden;
use crate::transport::{InboundHandler, Transport};

pub use admin::Admin;
pub use gateway::{AudioGateway, Direction};
pub use recorder::Recorder;

/// Per-feature reaction to recognized events.
pub trait EventHandler: Send + Sync + 'static {
    type Event: EventSet;

    fn feature(&self) -> &'static str;
    fn presenter(&self) -> &dyn Presenter;
    /// `raw` is the envelope as received, for fallbacks.
    fn on_event(&self, event: Self::Event, env: &Response, raw: &Value);
}

/// Inbound callback shared by all adapters.
pub struct Dispatch<H> {
    handler: H,
    debug: bool,
}

impl<H: EventHandler> Dispatch<H> {
    pub fn new(handler: H, debug: bool) -> Self {
        Self { handler, debug }
    }
}

impl<H: EventHandler> InboundHandler for Dispatch<H> {
    fn on_message(&self, msg: Value) {
        let feature = self.handler.feature();
        if self.debug {
            match msg.get("event").and_then(Value::as_str) {
                Some(event) if is_hidden(event) => {
                    tracing::info!(feature, event, "inbound (content hidden)");
                }
                _ => tracing::info!(feature, %msg, "inbound"),
            }
        }

        let env = match Response::from_value(&msg) {
            Ok(env) => env,
            Err(e) => {
                tracing::error!(feature, error = %e, "no event in incoming message");
                self.handler.presenter().show(GENERIC_REGION, &msg);
                return;
            }
        };

        if let Some(err) = &env.error {
            tracing::warn!(feature, event = %env.event, code = err.code, description = %err.description, "server error");
        }

        match H::Event::parse(&env.event) {
            Some(event) => self.handler.on_event(event, &env, &msg),
            None => self.handler.presenter().show(GENERIC_REGION, &msg),
        }
    }
}

/// Payload to render for a recognized event: `response`/`parameter`, or the
/// whole envelope when the server sent neither (error replies).
pub(crate) fn body<'a>(env: &'a Response, raw: &'a Value) -> &'a Value {
    env.payload().unwrap_or(raw)
}

/// Outbound half shared by all adapters.
pub struct AdapterCore {
    feature: &'static str,
    transport: Option<Transport>,
    client_id: String,
}

impl AdapterCore {
    /// Install `handler` on the transport and push `debug` into it.
    ///
    /// Without a transport the adapter stays degraded: this logs once here
    /// and every send fails with `NoTransport`.
    pub fn bind(
        feature: &'static str,
        transport: Option<Transport>,
        debug: bool,
        handler: Arc<dyn InboundHandler>,
    ) -> Self {
        match &transport {
            Some(t) => {
                t.set_handler(handler);
                t.set_debug(debug);
            }
            None => tracing::error!(feature, "no transport available, adapter not functional"),
        }
        Self {
            feature,
            transport,
            client_id: new_request_id(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn transport(&self) -> Option<&Transport> {
        self.transport.as_ref()
    }

    pub fn request<E: EventSet>(&self, event: E, parameter: Map<String, Value>) -> Request {
        Request::new(event.as_str(), parameter).with_client(self.client_id.as_str())
    }

    /// Fire-and-forget. Returns the request id.
    pub fn send<E: EventSet>(&self, event: E, parameter: Map<String, Value>) -> Result<String> {
        let transport = self.bound(event)?;
        let req = self.request(event, parameter);
        transport.send_request(&req)?;
        Ok(req.id)
    }

    /// Send and wait for the correlated reply.
    pub async fn call<E: EventSet>(
        &self,
        event: E,
        parameter: Map<String, Value>,
        timeout: Duration,
    ) -> Result<Response> {
        let transport = self.bound(event)?;
        let req = self.request(event, parameter);
        transport.request(&req, timeout).await
    }

    fn bound<E: EventSet>(&self, event: E) -> Result<&Transport> {
        self.transport.as_ref().ok_or_else(|| {
            tracing::error!(feature = self.feature, event = event.as_str(), "no transport, request dropped");
            OvError::NoTransport
        })
    }
}

/// Build a parameter object from string pairs.
pub(crate) fn params<const N: usize>(pairs: [(&str, &str); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}
