//! Recorder adapter.

use std::sync::Arc;

use serde_json::{Map, Value};

use ovclient_core::error::Result;
use ovclient_core::protocol::{RecorderEvent, Response};

use crate::adapter::{body, params, AdapterCore, Dispatch, EventHandler};
use crate::present::Presenter;
use crate::transport::{InboundHandler, Transport};

pub const FEATURE: &str = "recorder";

struct RecorderView {
    presenter: Arc<dyn Presenter>,
}

impl EventHandler for RecorderView {
    type Event = RecorderEvent;

    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn presenter(&self) -> &dyn Presenter {
        self.presenter.as_ref()
    }

    fn on_event(&self, event: RecorderEvent, env: &Response, raw: &Value) {
        let region = match event {
            RecorderEvent::GetRecordings | RecorderEvent::LoadRecordings => "recordings",
            RecorderEvent::SaveRecordings
            | RecorderEvent::AddRecording
            | RecorderEvent::DelRecording => "status",
        };
        self.presenter.show(region, body(env, raw));
    }
}

pub struct Recorder {
    core: AdapterCore,
    inbound: Arc<Dispatch<RecorderView>>,
}

impl Recorder {
    pub fn new(transport: Option<Transport>, presenter: Arc<dyn Presenter>, debug: bool) -> Self {
        let inbound = Arc::new(Dispatch::new(RecorderView { presenter }, debug));
        let handler: Arc<dyn InboundHandler> = inbound.clone();
        Self {
            core: AdapterCore::bind(FEATURE, transport, debug, handler),
            inbound,
        }
    }

    pub fn core(&self) -> &AdapterCore {
        &self.core
    }

    pub fn handle(&self, msg: Value) {
        self.inbound.on_message(msg);
    }

    /// All recordings, or only those of `loop_name`.
    pub fn get_recordings(&self, loop_name: Option<&str>) -> Result<String> {
        let parameter = match loop_name {
            Some(l) => params([("loop", l)]),
            None => Map::new(),
        };
        self.core.send(RecorderEvent::GetRecordings, parameter)
    }

    pub fn load_recordings(&self) -> Result<String> {
        self.core.send(RecorderEvent::LoadRecordings, Map::new())
    }

    pub fn save_recordings(&self) -> Result<String> {
        self.core.send(RecorderEvent::SaveRecordings, Map::new())
    }

    pub fn add_recording(&self, loop_name: &str) -> Result<String> {
        self.core.send(RecorderEvent::AddRecording, params([("loop", loop_name)]))
    }

    pub fn del_recording(&self, loop_name: &str) -> Result<String> {
        self.core.send(RecorderEvent::DelRecording, params([("loop", loop_name)]))
    }
}
