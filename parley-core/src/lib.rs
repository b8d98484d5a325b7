//! Wire vocabulary shared by the parley relay and its clients.
//!
//! Every frame on the signaling socket is one JSON object:
//!
//! ```json
//! {"type": "offer", "from": "alice", "to": "bob", "payload": {"sdp": "..."}}
//! ```
//!
//! `type` selects the [`Payload`] variant. The relay never looks inside
//! negotiation payloads beyond decoding them into their typed shape.

pub mod error;
pub mod model;

pub use error::DecodeError;
pub use model::*;
