use crate::error::TransportError;
use async_trait::async_trait;
use axum::extract::ws::Utf8Bytes;

/// One serialized signaling message. Cheap to clone, so a broadcast shares a
/// single buffer between all recipients.
pub type Frame = Utf8Bytes;

/// Receiving half of a message-framed connection.
#[async_trait]
pub trait FrameReader: Send + 'static {
    /// Next text frame, or `None` once the peer has closed the connection.
    async fn next_frame(&mut self) -> Option<Result<Frame, TransportError>>;
}

/// Sending half of a message-framed connection.
#[async_trait]
pub trait FrameWriter: Send + 'static {
    async fn send_frame(&mut self, frame: Frame) -> Result<(), TransportError>;

    /// Close the connection. Errors are irrelevant at this point and ignored.
    async fn close(&mut self);
}
