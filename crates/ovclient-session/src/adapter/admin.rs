//! Admin console adapter.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

use ovclient_core::error::Result;
use ovclient_core::model::{parse_domains, parse_projects, parse_roles, ParseError};
use ovclient_core::protocol::{AdminEvent, Response};

use crate::adapter::{body, params, AdapterCore, Dispatch, EventHandler};
use crate::present::{Presenter, GENERIC_REGION};
use crate::transport::{InboundHandler, Transport};

pub const FEATURE: &str = "admin";

struct AdminView {
    presenter: Arc<dyn Presenter>,
}

impl AdminView {
    fn show_models<T: Serialize>(
        &self,
        region: &str,
        key: &str,
        env: &Response,
        raw: &Value,
        parse: fn(&Value) -> std::result::Result<Vec<T>, ParseError>,
    ) {
        let parsed = match env.field(key) {
            Some(data) => parse(data),
            None => {
                tracing::warn!(feature = FEATURE, event = %env.event, key, "missing in response");
                self.presenter.show(GENERIC_REGION, raw);
                return;
            }
        };
        let rendered = parsed
            .map_err(|e| e.to_string())
            .and_then(|items| serde_json::to_value(items).map_err(|e| e.to_string()));
        match rendered {
            Ok(v) => self.presenter.show(region, &v),
            Err(e) => {
                tracing::warn!(feature = FEATURE, event = %env.event, error = %e, "unusable response");
                self.presenter.show(GENERIC_REGION, raw);
            }
        }
    }
}

impl EventHandler for AdminView {
    type Event = AdminEvent;

    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn presenter(&self) -> &dyn Presenter {
        self.presenter.as_ref()
    }

    fn on_event(&self, event: AdminEvent, env: &Response, raw: &Value) {
        let p = &self.presenter;
        match event {
            AdminEvent::Login | AdminEvent::Logout => p.show("login", body(env, raw)),
            AdminEvent::Authorize => p.show("authorize", body(env, raw)),
            AdminEvent::StateMixer => p.show("mixer", body(env, raw)),
            AdminEvent::StateConnections => p.show("connections", body(env, raw)),
            AdminEvent::StateSession => p.show("session", body(env, raw)),
            AdminEvent::AdminDomains => self.show_models("domains", "domains", env, raw, parse_domains),
            AdminEvent::AdminProjects => {
                self.show_models("projects", "projects", env, raw, parse_projects)
            }
            AdminEvent::UserRoles => self.show_models("roles", "roles", env, raw, parse_roles),
        }
    }
}

pub struct Admin {
    core: AdapterCore,
    inbound: Arc<Dispatch<AdminView>>,
}

impl Admin {
    pub fn new(transport: Option<Transport>, presenter: Arc<dyn Presenter>, debug: bool) -> Self {
        let inbound = Arc::new(Dispatch::new(AdminView { presenter }, debug));
        let handler: Arc<dyn InboundHandler> = inbound.clone();
        Self {
            core: AdapterCore::bind(FEATURE, transport, debug, handler),
            inbound,
        }
    }

    pub fn core(&self) -> &AdapterCore {
        &self.core
    }

    /// Route one inbound message, exactly as the transport would.
    pub fn handle(&self, msg: Value) {
        self.inbound.on_message(msg);
    }

    pub fn login(&self, user: &str, password: &str) -> Result<String> {
        self.core
            .send(AdminEvent::Login, params([("user", user), ("password", password)]))
    }

    /// Login and wait for the server's answer.
    pub async fn login_confirmed(
        &self,
        user: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Response> {
        self.core
            .call(AdminEvent::Login, params([("user", user), ("password", password)]), timeout)
            .await
    }

    pub fn logout(&self) -> Result<String> {
        self.core.send(AdminEvent::Logout, Map::new())
    }

    pub fn authorize(&self, role: &str) -> Result<String> {
        self.core.send(AdminEvent::Authorize, params([("role", role)]))
    }

    pub fn state_mixer(&self) -> Result<String> {
        self.core.send(AdminEvent::StateMixer, Map::new())
    }

    pub fn state_connections(&self) -> Result<String> {
        self.core.send(AdminEvent::StateConnections, Map::new())
    }

    pub fn state_session(&self) -> Result<String> {
        self.core.send(AdminEvent::StateSession, Map::new())
    }

    pub fn admin_domains(&self) -> Result<String> {
        self.core.send(AdminEvent::AdminDomains, Map::new())
    }

    pub fn admin_projects(&self) -> Result<String> {
        self.core.send(AdminEvent::AdminProjects, Map::new())
    }

    pub fn user_roles(&self) -> Result<String> {
        self.core.send(AdminEvent::UserRoles, Map::new())
    }
}
