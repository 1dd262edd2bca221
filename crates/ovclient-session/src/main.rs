//! openvocs client
//!
//! - Loads `ovclient.yaml` (or the path given as first argument)
//! - Connects every configured endpoint over WebSocket
//! - Sends each feature's first requests and logs what comes back
//! - Runs until Ctrl-C, then disconnects

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use ovclient_session::client::Client;
use ovclient_session::config;
use ovclient_session::present::{Presenter, TracingPresenter};
use ovclient_session::transport::WsConnector;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "ovclient.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");

    let client = Client::new(&cfg, Arc::new(WsConnector), |feature| {
        Arc::new(TracingPresenter::new(feature.as_str())) as Arc<dyn Presenter>
    });

    tracing::info!(name = %cfg.client.name, endpoints = client.endpoints().len(), "ovclient starting");
    if let Err(e) = client.connect_all().await {
        tracing::error!(error = %e, "giving up");
        return;
    }

    client.prime().await;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "signal handler failed");
    }
    client.disconnect_all();
    tracing::info!("ovclient stopped");
}
