//! Pending-request map for `Transport::request`.
//!
//! Keyed by request id. An entry is completed by the first inbound frame whose
//! `uuid` matches, and dropped on timeout or disconnect. Dropping the sender
//! wakes the waiter with a closed-channel error.

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::oneshot;

#[derive(Debug, Default)]
pub struct PendingRequests {
    waiting: DashMap<String, oneshot::Sender<Value>>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self {
            waiting: DashMap::new(),
        }
    }

    pub fn register(&self, id: &str) -> oneshot::Receiver<Value> {
        let (tx, rx) = oneshot::channel();
        self.waiting.insert(id.to_string(), tx);
        rx
    }

    pub fn forget(&self, id: &str) {
        self.waiting.remove(id);
    }

    /// Complete the waiter for `msg.uuid`, if any. Returns whether one was found.
    pub fn resolve(&self, msg: &Value) -> bool {
        let Some(id) = msg.get("uuid").and_then(Value::as_str) else {
            return false;
        };
        match self.waiting.remove(id) {
            Some((_, tx)) => {
                let _ = tx.send(msg.clone());
                true
            }
            None => false,
        }
    }

    pub fn fail_all(&self) {
        self.waiting.clear();
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
