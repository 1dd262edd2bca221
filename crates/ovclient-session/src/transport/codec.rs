//! Frame codec for the WebSocket pump.
//!
//! - Text frames are passed on verbatim (JSON decoding happens in `Transport`)
//! - Binary frames are not part of the signaling protocol and are only counted
//! - Close carries code/reason for the lifecycle log

use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Binary { bytes_len: usize },
    Ping,
    Pong,
    /// Raw frame; only produced when writing, ignored if seen.
    Raw,
    Close { code: u16, reason: String },
}

pub fn decode(msg: Message) -> Inbound {
    match msg {
        Message::Text(s) => Inbound::Text(s),
        Message::Binary(b) => Inbound::Binary { bytes_len: b.len() },
        Message::Ping(_) => Inbound::Ping,
        Message::Pong(_) => Inbound::Pong,
        Message::Frame(_) => Inbound::Raw,
        Message::Close(frame) => {
            let (code, reason) = frame
                .map(|cf| (u16::from(cf.code), cf.reason.to_string()))
                .unwrap_or((1005, String::new()));
            Inbound::Close { code, reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
    use tokio_tungstenite::tungstenite::protocol::CloseFrame;

    #[test]
    fn close_without_frame_is_1005() {
        assert_eq!(
            decode(Message::Close(None)),
            Inbound::Close { code: 1005, reason: String::new() }
        );
    }

    #[test]
    fn close_frame_keeps_code_and_reason() {
        let msg = Message::Close(Some(CloseFrame {
            code: CloseCode::Away,
            reason: "bye".into(),
        }));
        assert_eq!(decode(msg), Inbound::Close { code: 1001, reason: "bye".into() });
    }

    #[test]
    fn raw_frame_is_not_a_pong() {
        let frame = tokio_tungstenite::tungstenite::protocol::frame::Frame::ping(vec![]);
        assert_eq!(decode(Message::Frame(frame)), Inbound::Raw);
        assert_eq!(decode(Message::Pong(vec![])), Inbound::Pong);
    }

    #[test]
    fn binary_is_only_measured() {
        assert_eq!(decode(Message::Binary(vec![0; 3])), Inbound::Binary { bytes_len: 3 });
    }
}
