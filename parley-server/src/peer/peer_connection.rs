use crate::transport::Frame;
use parley_core::{SignalMessage, UserId};
use std::fmt;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Distinguishes successive connections that used the same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry-side view of one admitted peer: its identity and the producer
/// end of its bounded outbound queue.
///
/// Dropping it closes the queue, which is what stops the peer's writer.
#[derive(Debug)]
pub struct PeerConnection {
    user_id: UserId,
    connection_id: ConnectionId,
    outbound: mpsc::Sender<Frame>,
}

impl PeerConnection {
    /// Create a connection together with the consumer end of its queue.
    pub fn channel(user_id: UserId, capacity: usize) -> (Self, mpsc::Receiver<Frame>) {
        let (outbound, outbound_rx) = mpsc::channel(capacity.max(1));
        let peer = Self {
            user_id,
            connection_id: ConnectionId::new(),
            outbound,
        };
        (peer, outbound_rx)
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Serialize and enqueue `message`. Never waits; see [`Self::send_frame`].
    pub fn send(&self, message: &SignalMessage) -> bool {
        match message.encode() {
            Ok(json) => self.send_frame(Frame::from(json)),
            Err(e) => {
                error!("Failed to serialize `{}` for {}: {}", message.kind(), self.user_id, e);
                false
            }
        }
    }

    /// Enqueue an already serialized frame. A full queue drops the frame, so
    /// a slow reader can never stall the caller. Returns whether it was queued.
    pub fn send_frame(&self, frame: Frame) -> bool {
        match self.outbound.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Outbound queue full for {}, dropping message", self.user_id);
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Outbound queue closed for {}, dropping message", self.user_id);
                false
            }
        }
    }
}
