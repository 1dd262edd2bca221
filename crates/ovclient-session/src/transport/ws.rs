//! WebSocket connector (tokio-tungstenite).
//!
//! Responsibilities:
//! - Perform the client handshake for `ws://` / `wss://` addresses
//! - Run one pump task per link: outbound channel -> socket, socket -> inbound channel
//! - Surface errors and the final close as `LinkEvent`s

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use ovclient_core::error::{OvError, Result};

use crate::transport::codec::{decode, Inbound};
use crate::transport::link::{Connector, Link, LinkEvent, Outbound};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Abnormal closure, used when the peer vanishes without a close frame.
const CLOSE_ABNORMAL: u16 = 1006;
const CLOSE_NORMAL: u16 = 1000;

#[derive(Debug, Default, Clone, Copy)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn open(&self, address: &str) -> Result<Link> {
        let (stream, _resp) = tokio_tungstenite::connect_async(address)
            .await
            .map_err(|e| OvError::Transport(format!("connect {address} failed: {e}")))?;

        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        tokio::spawn(pump(stream, out_rx, in_tx));

        Ok(Link {
            outbound: out_tx,
            inbound: in_rx,
        })
    }
}

async fn pump(
    stream: WsStream,
    mut out_rx: mpsc::UnboundedReceiver<Outbound>,
    in_tx: mpsc::UnboundedSender<LinkEvent>,
) {
    let (mut ws_tx, mut ws_rx) = stream.split();

    // the receiver may already be gone after a local disconnect, so sends are best-effort
    let closed = loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(Outbound::Text(text)) => {
                        if let Err(e) = ws_tx.send(Message::Text(text)).await {
                            let _ = in_tx.send(LinkEvent::Error(format!("send failed: {e}")));
                            break (CLOSE_ABNORMAL, String::new());
                        }
                    }
                    Some(Outbound::Close) | None => {
                        let _ = ws_tx.send(Message::Close(None)).await;
                        let _ = ws_tx.close().await;
                        break (CLOSE_NORMAL, "closed by client".to_string());
                    }
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let msg = match incoming {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        let _ = in_tx.send(LinkEvent::Error(e.to_string()));
                        break (CLOSE_ABNORMAL, String::new());
                    }
                    None => break (CLOSE_ABNORMAL, String::new()),
                };

                match decode(msg) {
                    Inbound::Text(text) => {
                        let _ = in_tx.send(LinkEvent::Frame(text));
                    }
                    Inbound::Binary { bytes_len } => {
                        tracing::debug!(bytes_len, "binary frame ignored");
                    }
                    // pongs are queued by tungstenite itself
                    Inbound::Ping | Inbound::Pong => {}
                    Inbound::Raw => tracing::debug!("raw frame ignored"),
                    Inbound::Close { code, reason } => break (code, reason),
                }
            }
        }
    };

    let (code, reason) = closed;
    let _ = in_tx.send(LinkEvent::Closed { code, reason });
}
