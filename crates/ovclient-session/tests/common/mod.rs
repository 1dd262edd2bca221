//! Shared test doubles: in-memory connector, recording presenter, log counter.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use ovclient_core::error::{OvError, Result};
use ovclient_session::present::Presenter;
use ovclient_session::transport::{Connector, Link, LinkEvent, Outbound, Transport};

pub const ADDRESS: &str = "ws://memory/vocs";

/// Server side of one in-memory link.
pub struct Peer {
    pub sent: mpsc::UnboundedReceiver<Outbound>,
    pub inject: mpsc::UnboundedSender<LinkEvent>,
}

impl Peer {
    /// Text frames the client transmitted so far, decoded.
    pub fn frames(&mut self) -> Vec<Value> {
        let mut out = Vec::new();
        while let Ok(o) = self.sent.try_recv() {
            if let Outbound::Text(s) = o {
                out.push(serde_json::from_str(&s).unwrap());
            }
        }
        out
    }

    pub fn push(&self, frame: &Value) {
        self.inject.send(LinkEvent::Frame(frame.to_string())).unwrap();
    }

    pub fn push_raw(&self, text: &str) {
        self.inject.send(LinkEvent::Frame(text.to_string())).unwrap();
    }

    pub fn close(&self) {
        self.inject
            .send(LinkEvent::Closed { code: 1000, reason: "bye".into() })
            .unwrap();
    }
}

#[derive(Default)]
pub struct MemoryConnector {
    opens: AtomicUsize,
    refuse: AtomicBool,
    peers: Mutex<Vec<Peer>>,
}

impl MemoryConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn refuse(&self, on: bool) {
        self.refuse.store(on, Ordering::SeqCst);
    }

    /// Peer of the oldest link not yet taken.
    pub fn peer(&self) -> Peer {
        self.peers.lock().unwrap().remove(0)
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn open(&self, address: &str) -> Result<Link> {
        // give concurrent callers a chance to interleave
        tokio::task::yield_now().await;
        self.opens.fetch_add(1, Ordering::SeqCst);
        if self.refuse.load(Ordering::SeqCst) {
            return Err(OvError::Transport(format!("refused {address}")));
        }
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        self.peers.lock().unwrap().push(Peer {
            sent: out_rx,
            inject: in_tx,
        });
        Ok(Link {
            outbound: out_tx,
            inbound: in_rx,
        })
    }
}

pub async fn connected(connector: &Arc<MemoryConnector>) -> (Transport, Peer) {
    let transport = Transport::new("test", connector.clone());
    transport.connect(ADDRESS).await.unwrap();
    (transport, connector.peer())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Show(String, Value),
    Soundcards(Vec<String>),
    Field(String, String),
    Select(String, String),
}

#[derive(Default)]
pub struct RecordingPresenter {
    calls: Mutex<Vec<Call>>,
}

impl RecordingPresenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Presenter for RecordingPresenter {
    fn show(&self, region: &str, value: &Value) {
        self.record(Call::Show(region.into(), value.clone()));
    }

    fn show_soundcards(&self, cards: &[String]) {
        self.record(Call::Soundcards(cards.to_vec()));
    }

    fn show_field(&self, field: &str, value: &str) {
        self.record(Call::Field(field.into(), value.into()));
    }

    fn select(&self, selector: &str, value: &str) {
        self.record(Call::Select(selector.into(), value.into()));
    }
}

/// Counts WARN and ERROR events and keeps the fields of every event.
#[derive(Clone, Default)]
pub struct LogCounter {
    warnings: Arc<AtomicUsize>,
    errors: Arc<AtomicUsize>,
    lines: Arc<Mutex<Vec<String>>>,
}

struct Fields(String);

impl tracing::field::Visit for Fields {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push_str(&format!(" {}={:?}", field.name(), value));
    }
}

impl LogCounter {
    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    /// Every event seen so far, rendered as `name=value` pairs.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for LogCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level == Level::WARN {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        } else if level == Level::ERROR {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
        let mut fields = Fields(String::new());
        event.record(&mut fields);
        self.lines.lock().unwrap().push(fields.0);
    }
}

/// Install a counter as the thread-local subscriber for the guard's lifetime.
pub fn count_logs() -> (LogCounter, tracing::subscriber::DefaultGuard) {
    use tracing_subscriber::layer::SubscriberExt;

    let counter = LogCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (counter, guard)
}

/// Poll `cond` until it holds, yielding to spawned tasks in between.
pub async fn wait_for(mut cond: impl FnMut() -> bool) {
    for _ in 0..400 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached");
}
