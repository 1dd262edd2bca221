//! Top-level facade crate for the openvocs client.
//!
//! Re-exports the protocol core and the session layer so users can depend on a single crate.

pub mod core {
    pub use ovclient_core::*;
}

pub mod session {
    pub use ovclient_session::*;
}
