use crate::peer::ConnectionId;
use crate::registry::{Registration, RegistryHandle};
use crate::transport::{Frame, FrameReader, FrameWriter};
use parley_core::{Payload, SignalMessage, UserId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// A registered connection that is ready to run its read and write loops.
///
/// Produced by [`RegistryHandle::admit`]; drive it with [`PeerSession::run`],
/// which performs the single unregister at the end. Dropping the session, or
/// cancelling `run`, unregisters as well.
pub struct PeerSession<R, W> {
    user_id: UserId,
    connection_id: ConnectionId,
    reader: R,
    writer: W,
    outbound_rx: mpsc::Receiver<Frame>,
    registration: Registration,
}

/// The two loops of a running session. Aborted together when dropped.
struct SessionTasks {
    send: JoinHandle<()>,
    recv: JoinHandle<()>,
}

impl Drop for SessionTasks {
    fn drop(&mut self) {
        self.send.abort();
        self.recv.abort();
    }
}

impl<R: FrameReader, W: FrameWriter> PeerSession<R, W> {
    pub(crate) fn new(
        user_id: UserId,
        connection_id: ConnectionId,
        reader: R,
        writer: W,
        outbound_rx: mpsc::Receiver<Frame>,
        registry: RegistryHandle,
    ) -> Self {
        Self {
            registration: Registration::new(registry, user_id.clone(), connection_id),
            user_id,
            connection_id,
            reader,
            writer,
            outbound_rx,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Run both loops until the connection ends, then unregister once.
    pub async fn run(self) {
        let Self {
            user_id,
            connection_id,
            reader,
            writer,
            outbound_rx,
            mut registration,
        } = self;

        info!("Peer {} active ({})", user_id, connection_id);

        let registry = registration.registry().clone();
        let mut tasks = SessionTasks {
            send: tokio::spawn(write_loop(writer, outbound_rx, user_id.clone())),
            recv: tokio::spawn(read_loop(reader, registry, user_id.clone())),
        };

        tokio::select! {
            _ = &mut tasks.recv => {
                registration.release().await;
                // Unregistering drops the queue sender, so the writer drains what
                // is left and exits.
                let _ = (&mut tasks.send).await;
            }
            _ = &mut tasks.send => {
                tasks.recv.abort();
                registration.release().await;
            }
        }

        info!("Peer {} disconnected", user_id);
    }
}

async fn read_loop<R: FrameReader>(mut reader: R, registry: RegistryHandle, user_id: UserId) {
    while let Some(frame) = reader.next_frame().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Read failed for {}: {}", user_id, e);
                break;
            }
        };

        let mut message = match SignalMessage::decode(frame.as_str()) {
            Ok(message) => message,
            Err(e) => {
                warn!("Discarding invalid frame from {}: {}", user_id, e);
                continue;
            }
        };

        // Whatever the client claimed, the sender is who it joined as.
        message.from = Some(user_id.clone());

        if matches!(message.payload, Payload::Leave) {
            info!("Peer {} asked to leave", user_id);
            break;
        }

        debug!("Message from {}: type={}", user_id, message.kind());
        if registry.route(message).await.is_err() {
            error!("Registry stopped, closing connection of {}", user_id);
            break;
        }
    }
}

async fn write_loop<W: FrameWriter>(
    mut writer: W,
    mut outbound_rx: mpsc::Receiver<Frame>,
    user_id: UserId,
) {
    while let Some(frame) = outbound_rx.recv().await {
        if let Err(e) = writer.send_frame(frame).await {
            warn!("Write failed for {}: {}", user_id, e);
            break;
        }
    }
    writer.close().await;
}
