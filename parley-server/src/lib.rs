//! Signaling relay: admits WebSocket endpoints under unique identities and
//! forwards their connection-negotiation messages to each other.
//!
//! The [`Registry`] actor owns the identity table. Each admitted connection
//! runs as a [`PeerSession`] with its own read loop, write loop and bounded
//! outbound queue. [`router`] exposes it all over HTTP.

mod auth;
mod config;
mod error;
mod peer;
mod registry;
mod signaling;
mod transport;

pub use auth::*;
pub use config::*;
pub use error::*;
pub use peer::*;
pub use registry::*;
pub use signaling::*;
pub use transport::*;
