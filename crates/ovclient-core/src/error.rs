//! Shared error type across the client crates.

use thiserror::Error;

/// Stable error kinds, usable as log fields and in test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No open connection.
    NotConnected,
    /// Adapter built without a transport.
    NoTransport,
    /// Connection level failure.
    Transport,
    /// Frame or envelope could not be decoded.
    Malformed,
    /// No reply within the request timeout.
    Timeout,
    /// Connection closed while a reply was pending.
    Disconnected,
    /// Server answered with an `error` object.
    Server,
    /// Configuration rejected.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotConnected => "NOT_CONNECTED",
            ErrorKind::NoTransport => "NO_TRANSPORT",
            ErrorKind::Transport => "TRANSPORT",
            ErrorKind::Malformed => "MALFORMED",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Disconnected => "DISCONNECTED",
            ErrorKind::Server => "SERVER",
            ErrorKind::BadConfig => "BAD_CONFIG",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, OvError>;

/// Unified error type used by core and session.
#[derive(Debug, Error)]
pub enum OvError {
    #[error("not connected")]
    NotConnected,
    #[error("no transport bound")]
    NoTransport,
    #[error("transport: {0}")]
    Transport(String),
    #[error("malformed: {0}")]
    Malformed(String),
    #[error("request {0} timed out")]
    Timeout(String),
    #[error("disconnected before response")]
    Disconnected,
    #[error("server error {code}: {description}")]
    Server { code: u64, description: String },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl OvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OvError::NotConnected => ErrorKind::NotConnected,
            OvError::NoTransport => ErrorKind::NoTransport,
            OvError::Transport(_) => ErrorKind::Transport,
            OvError::Malformed(_) => ErrorKind::Malformed,
            OvError::Timeout(_) => ErrorKind::Timeout,
            OvError::Disconnected => ErrorKind::Disconnected,
            OvError::Server { .. } => ErrorKind::Server,
            OvError::BadConfig(_) => ErrorKind::BadConfig,
            OvError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            OvError::Internal(_) => ErrorKind::Internal,
        }
    }
}
