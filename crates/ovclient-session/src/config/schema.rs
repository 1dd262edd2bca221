use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use ovclient_core::error::{OvError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OvError::UnsupportedVersion);
        }
        if self.endpoints.is_empty() {
            return Err(OvError::BadConfig("endpoints must not be empty".into()));
        }

        self.client.validate()?;

        for (i, ep) in self.endpoints.iter().enumerate() {
            if self.endpoints[..i].iter().any(|e| e.feature == ep.feature) {
                return Err(OvError::BadConfig(format!(
                    "endpoint feature {} configured twice",
                    ep.feature.as_str()
                )));
            }
            ep.validate()?;
        }

        Ok(())
    }

    pub fn endpoint(&self, feature: Feature) -> Option<&EndpointConfig> {
        self.endpoints.iter().find(|e| e.feature == feature)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Prefix of every transport name in the logs.
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Keep the historic `output` -> `none` selector mapping.
    #[serde(default = "default_direction_fallthrough")]
    pub direction_fallthrough: bool,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            debug: false,
            request_timeout_ms: default_request_timeout_ms(),
            direction_fallthrough: default_direction_fallthrough(),
        }
    }
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OvError::BadConfig("client.name must not be empty".into()));
        }
        if !(100..=120000).contains(&self.request_timeout_ms) {
            return Err(OvError::BadConfig(
                "client.request_timeout_ms must be between 100 and 120000".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_name() -> String {
    "vocs".into()
}
fn default_request_timeout_ms() -> u64 {
    5000
}
fn default_direction_fallthrough() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Admin,
    AlsaGateway,
    Recorder,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Admin => "admin",
            Feature::AlsaGateway => "alsa_gateway",
            Feature::Recorder => "recorder",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub feature: Feature,
    pub address: String,

    /// Overrides `client.debug`.
    #[serde(default)]
    pub debug: Option<bool>,

    /// Admin only: log in right after connecting.
    #[serde(default)]
    pub login: Option<Credentials>,
}

impl EndpointConfig {
    pub fn validate(&self) -> Result<()> {
        let host = self
            .address
            .strip_prefix("wss://")
            .or_else(|| self.address.strip_prefix("ws://"));
        if host.map_or(true, str::is_empty) {
            return Err(OvError::BadConfig(format!(
                "endpoint {}: address must be a ws:// or wss:// url",
                self.feature.as_str()
            )));
        }
        if self.login.is_some() && self.feature != Feature::Admin {
            return Err(OvError::BadConfig(format!(
                "endpoint {}: login is only valid for admin",
                self.feature.as_str()
            )));
        }
        Ok(())
    }

    pub fn debug(&self, client: &ClientSection) -> bool {
        self.debug.unwrap_or(client.debug)
    }
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}
