//! ALSA audio gateway adapter.

use std::sync::Arc;

use serde_json::{Map, Value};

use ovclient_core::error::Result;
use ovclient_core::protocol::{GatewayEvent, Response};

use crate::adapter::{body, params, AdapterCore, Dispatch, EventHandler};
use crate::present::{Presenter, GENERIC_REGION};
use crate::transport::{InboundHandler, Transport};

pub const FEATURE: &str = "alsa_gateway";

/// Audio direction of a gateway configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
    Other,
}

impl Direction {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "input" => Direction::Input,
            "output" => Direction::Output,
            _ => Direction::Other,
        }
    }

    /// Value for the `direction` selector.
    ///
    /// With `fallthrough` set, `output` lands on `none`, which is what deployed
    /// admin pages have always shown.
    // TODO: switch the shipped default to `fallthrough: false` once the
    // admin pages stop relying on `none` for output gateways.
    pub fn selector(self, fallthrough: bool) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output if fallthrough => "none",
            Direction::Output => "output",
            Direction::Other => "none",
        }
    }
}

struct GatewayView {
    presenter: Arc<dyn Presenter>,
    fallthrough: bool,
}

impl GatewayView {
    fn show_configuration(&self, env: &Response) {
        let p = &self.presenter;
        if let Some(name) = env.field("name").and_then(Value::as_str) {
            p.show_field("name", name);
        }
        let config = env.field("config");
        if let Some(host) = config.and_then(|c| c.get("host")).and_then(Value::as_str) {
            p.show_field("host", host);
        }
        let direction = config
            .and_then(|c| c.get("direction"))
            .and_then(Value::as_str)
            .map_or(Direction::Other, Direction::from_wire);
        p.select("direction", direction.selector(self.fallthrough));
    }
}

fn soundcard_names(v: &Value) -> Option<Vec<String>> {
    v.as_array()?
        .iter()
        .map(|c| c.as_str().map(str::to_string))
        .collect()
}

impl EventHandler for GatewayView {
    type Event = GatewayEvent;

    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn presenter(&self) -> &dyn Presenter {
        self.presenter.as_ref()
    }

    fn on_event(&self, event: GatewayEvent, env: &Response, raw: &Value) {
        match event {
            GatewayEvent::GetSoundcards => {
                match env.field("soundcards").and_then(soundcard_names) {
                    Some(cards) => self.presenter.show_soundcards(&cards),
                    None => {
                        tracing::warn!(feature = FEATURE, "soundcard list missing or malformed");
                        self.presenter.show(GENERIC_REGION, raw);
                    }
                }
            }
            GatewayEvent::GetConfiguration => self.show_configuration(env),
            GatewayEvent::GetHwParams => self.presenter.show("hw_params", body(env, raw)),
            GatewayEvent::PlayTone => self.presenter.show("tone", body(env, raw)),
        }
    }
}

pub struct AudioGateway {
    core: AdapterCore,
    inbound: Arc<Dispatch<GatewayView>>,
}

impl AudioGateway {
    pub fn new(
        transport: Option<Transport>,
        presenter: Arc<dyn Presenter>,
        debug: bool,
        direction_fallthrough: bool,
    ) -> Self {
        let view = GatewayView {
            presenter,
            fallthrough: direction_fallthrough,
        };
        let inbound = Arc::new(Dispatch::new(view, debug));
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

    pub fn get_soundcards(&self) -> Result<String> {
        self.core.send(GatewayEvent::GetSoundcards, Map::new())
    }

    pub fn get_configuration(&self) -> Result<String> {
        self.core.send(GatewayEvent::GetConfiguration, Map::new())
    }

    pub fn get_hw_params(&self, device: &str) -> Result<String> {
        self.core.send(GatewayEvent::GetHwParams, params([("device", device)]))
    }

    pub fn play_tone(&self, device: &str) -> Result<String> {
        self.core.send(GatewayEvent::PlayTone, params([("device", device)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_values() {
        assert_eq!(Direction::from_wire("input").selector(true), "input");
        assert_eq!(Direction::from_wire("output").selector(false), "output");
        assert_eq!(Direction::from_wire("both").selector(false), "none");
    }

    #[test]
    fn output_falls_through_to_none() {
        assert_eq!(Direction::Output.selector(true), "none");
    }
}
