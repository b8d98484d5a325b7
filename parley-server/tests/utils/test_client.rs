use crate::utils::{ChannelReader, ChannelWriter, join_frame, user_list_of};
use parley_server::{AdmissionError, Frame, RegistryHandle, TransportError};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::mpsc;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// The remote end of an in-memory connection.
pub struct TestClient {
    pub name: String,
    to_server: Option<mpsc::UnboundedSender<Result<Frame, TransportError>>>,
    from_server: mpsc::UnboundedReceiver<Frame>,
}

impl TestClient {
    /// A client plus the server-side halves of its transport.
    pub fn pair(name: &str) -> (Self, ChannelReader, ChannelWriter) {
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();

        let client = Self {
            name: name.to_string(),
            to_server: Some(in_tx),
            from_server: out_rx,
        };
        (client, ChannelReader::new(in_rx), ChannelWriter::new(out_tx))
    }

    /// Connect, send `first_frame` and run the session if admission succeeds.
    pub async fn connect(
        registry: &RegistryHandle,
        name: &str,
        first_frame: &str,
    ) -> (Self, Result<(), AdmissionError>) {
        let (client, reader, writer) = Self::pair(name);
        client.send_raw(first_frame);

        let result = match registry.admit(reader, writer).await {
            Ok(session) => {
                tokio::spawn(session.run());
                Ok(())
            }
            Err(e) => Err(e),
        };
        (client, result)
    }

    /// Join as `name`, panicking if admission fails.
    pub async fn join(registry: &RegistryHandle, name: &str) -> Self {
        let (client, result) = Self::connect(registry, name, &join_frame(name)).await;
        if let Err(e) = result {
            panic!("{name} failed to join: {e}");
        }
        client
    }

    pub fn send_raw(&self, text: &str) {
        if let Some(tx) = &self.to_server {
            let _ = tx.send(Ok(Frame::from(text.to_string())));
        }
    }

    pub fn send(&self, message: Value) {
        self.send_raw(&message.to_string());
    }

    /// Make the server see a broken transport.
    pub fn fail_transport(&self) {
        if let Some(tx) = &self.to_server {
            let _ = tx.send(Err(TransportError::Io("connection reset".to_string())));
        }
    }

    /// Close the client's sending side, like a dropped socket.
    pub fn disconnect(&mut self) {
        self.to_server = None;
    }

    /// Next frame from the server, `None` once the server closed the connection.
    pub async fn recv(&mut self) -> Option<Value> {
        let frame = tokio::time::timeout(RECV_TIMEOUT, self.from_server.recv())
            .await
            .unwrap_or_else(|_| panic!("{} timed out waiting for a frame", self.name))?;
        Some(serde_json::from_str(frame.as_str()).expect("server sent invalid JSON"))
    }

    pub async fn expect_message(&mut self) -> Value {
        match self.recv().await {
            Some(message) => message,
            None => panic!("{} was disconnected", self.name),
        }
    }

    pub async fn expect_user_list(&mut self) -> Vec<String> {
        let message = self.expect_message().await;
        user_list_of(&message)
    }

    /// Skip `user_list` frames until one equals `expected`.
    pub async fn wait_for_user_list(&mut self, expected: &[&str]) {
        loop {
            if self.expect_user_list().await == expected {
                return;
            }
        }
    }

    /// Nothing is queued for this client right now.
    pub fn expect_nothing_pending(&mut self) {
        if let Ok(frame) = self.from_server.try_recv() {
            panic!("{} got unexpected frame {}", self.name, frame.as_str());
        }
    }

    /// The server closed this connection. Frames still queued are discarded.
    pub async fn expect_closed(&mut self) {
        while self.recv().await.is_some() {}
    }
}
