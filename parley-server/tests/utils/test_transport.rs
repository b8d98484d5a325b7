use async_trait::async_trait;
use parley_server::{Frame, FrameReader, FrameWriter, TransportError};
use tokio::sync::mpsc;

/// Reader fed by a [`crate::utils::TestClient`].
pub struct ChannelReader {
    rx: mpsc::UnboundedReceiver<Result<Frame, TransportError>>,
}

impl ChannelReader {
    pub fn new(rx: mpsc::UnboundedReceiver<Result<Frame, TransportError>>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl FrameReader for ChannelReader {
    async fn next_frame(&mut self) -> Option<Result<Frame, TransportError>> {
        self.rx.recv().await
    }
}

/// Writer whose frames show up on a [`crate::utils::TestClient`]. Closing it
/// ends the client's receive stream.
pub struct ChannelWriter {
    tx: Option<mpsc::UnboundedSender<Frame>>,
}

impl ChannelWriter {
    pub fn new(tx: mpsc::UnboundedSender<Frame>) -> Self {
        Self { tx: Some(tx) }
    }
}

#[async_trait]
impl FrameWriter for ChannelWriter {
    async fn send_frame(&mut self, frame: Frame) -> Result<(), TransportError> {
        match &self.tx {
            Some(tx) => tx.send(frame).map_err(|_| TransportError::Closed),
            None => Err(TransportError::Closed),
        }
    }

    async fn close(&mut self) {
        self.tx = None;
    }
}

/// Writer that never completes a write, like a peer that stopped reading.
pub struct StalledWriter;

#[async_trait]
impl FrameWriter for StalledWriter {
    async fn send_frame(&mut self, _frame: Frame) -> Result<(), TransportError> {
        std::future::pending().await
    }

    async fn close(&mut self) {}
}

/// Writer whose every write fails.
pub struct BrokenWriter;

#[async_trait]
impl FrameWriter for BrokenWriter {
    async fn send_frame(&mut self, _frame: Frame) -> Result<(), TransportError> {
        Err(TransportError::Io("connection reset by peer".to_string()))
    }

    async fn close(&mut self) {}
}
