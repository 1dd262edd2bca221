//! Client assembly: one transport and one adapter per configured endpoint.
//!
//! Transports are created here and injected into the adapters; nothing in the
//! stack looks a connection up globally.

use std::sync::Arc;
use std::time::Duration;

use ovclient_core::error::{OvError, Result};

use crate::adapter::{Admin, AudioGateway, Recorder};
use crate::config::{ClientConfig, EndpointConfig, Feature};
use crate::present::Presenter;
use crate::transport::{Connector, Transport};

pub enum Adapter {
    Admin(Admin),
    Gateway(AudioGateway),
    Recorder(Recorder),
}

pub struct Endpoint {
    feature: Feature,
    address: String,
    login: Option<(String, String)>,
    transport: Transport,
    adapter: Adapter,
}

impl Endpoint {
    pub fn feature(&self) -> Feature {
        self.feature
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }
}

pub struct Client {
    endpoints: Vec<Endpoint>,
    request_timeout: Duration,
}

impl Client {
    /// Build transports and adapters. Nothing connects yet.
    pub fn new<P>(cfg: &ClientConfig, connector: Arc<dyn Connector>, presenter: P) -> Self
    where
        P: Fn(Feature) -> Arc<dyn Presenter>,
    {
        let endpoints = cfg
            .endpoints
            .iter()
            .map(|ep| build_endpoint(cfg, ep, Arc::clone(&connector), presenter(ep.feature)))
            .collect();

        Self {
            endpoints,
            request_timeout: cfg.client.request_timeout(),
        }
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn endpoint(&self, feature: Feature) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.feature == feature)
    }

    /// Connect every endpoint. Fails only if none could be reached.
    pub async fn connect_all(&self) -> Result<usize> {
        let mut connected = 0;
        for ep in &self.endpoints {
            match ep.transport.connect(&ep.address).await {
                Ok(()) => connected += 1,
                Err(e) => {
                    tracing::warn!(feature = ep.feature.as_str(), error = %e, "endpoint unreachable");
                }
            }
        }
        if connected == 0 {
            return Err(OvError::Transport("no endpoint reachable".into()));
        }
        Ok(connected)
    }

    /// First requests after connecting: admin login (if configured), gateway
    /// soundcards and configuration, recorder listing.
    pub async fn prime(&self) {
        for ep in self.endpoints.iter().filter(|e| e.transport.is_connected()) {
            let sent = match &ep.adapter {
                Adapter::Admin(admin) => match &ep.login {
                    Some((user, password)) => {
                        match admin.login_confirmed(user, password, self.request_timeout).await {
                            Ok(_) => {
                                tracing::info!(user = %user, "logged in");
                                admin.state_session().map(drop)
                            }
                            Err(e) => Err(e),
                        }
                    }
                    None => Ok(()),
                },
                Adapter::Gateway(gw) => gw.get_soundcards().and_then(|_| gw.get_configuration()).map(drop),
                Adapter::Recorder(rec) => rec.get_recordings(None).map(drop),
            };
            if let Err(e) = sent {
                tracing::warn!(feature = ep.feature.as_str(), error = %e, kind = e.kind().as_str(), "priming failed");
            }
        }
    }

    pub fn disconnect_all(&self) {
        for ep in &self.endpoints {
            ep.transport.disconnect();
        }
    }
}

fn build_endpoint(
    cfg: &ClientConfig,
    ep: &EndpointConfig,
    connector: Arc<dyn Connector>,
    presenter: Arc<dyn Presenter>,
) -> Endpoint {
    let transport = Transport::new(format!("{}/{}", cfg.client.name, ep.feature.as_str()), connector);
    let debug = ep.debug(&cfg.client);
    let handle = Some(transport.clone());

    let adapter = match ep.feature {
        Feature::Admin => Adapter::Admin(Admin::new(handle, presenter, debug)),
        Feature::AlsaGateway => Adapter::Gateway(AudioGateway::new(
            handle,
            presenter,
            debug,
            cfg.client.direction_fallthrough,
        )),
        Feature::Recorder => Adapter::Recorder(Recorder::new(handle, presenter, debug)),
    };

    Endpoint {
        feature: ep.feature,
        address: ep.address.clone(),
        login: ep.login.as_ref().map(|c| (c.user.clone(), c.password.clone())),
        transport,
        adapter,
    }
}
