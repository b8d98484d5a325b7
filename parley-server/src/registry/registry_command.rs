use crate::error::AdmissionError;
use crate::peer::{ConnectionId, PeerConnection};
use parley_core::{SignalMessage, UserId};
use tokio::sync::oneshot;

/// Events processed one at a time, in arrival order, by the registry loop.
#[derive(Debug)]
pub enum RegistryCommand {
    /// Add a freshly joined peer. Answered with `IdentityTaken` if the
    /// identity is already live.
    Register {
        peer: PeerConnection,
        reply: oneshot::Sender<Result<(), AdmissionError>>,
    },

    /// Remove a peer. Ignored unless the connection id matches the live entry.
    Unregister {
        user_id: UserId,
        connection_id: ConnectionId,
    },

    /// Forward a message whose `from` was stamped by the receiving connection.
    Route { message: SignalMessage },
}
