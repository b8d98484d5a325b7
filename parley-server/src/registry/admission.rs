use crate::error::AdmissionError;
use crate::peer::{PeerConnection, PeerSession};
use crate::registry::RegistryHandle;
use crate::transport::{Frame, FrameReader, FrameWriter};
use parley_core::{Payload, SignalMessage, UserId};
use std::time::Duration;
use tracing::info;

/// Text of the `error` frame sent to a join that reuses a live identity.
pub const IDENTITY_TAKEN_MESSAGE: &str = "User ID already exists";

impl RegistryHandle {
    /// Run the join handshake on a fresh transport.
    ///
    /// The first frame must be a `join` carrying a non-blank identity that no
    /// live connection holds. On success the peer is registered and the
    /// returned session must be run. On failure the transport is closed; only
    /// a duplicate identity gets an `error` frame first.
    pub async fn admit<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<PeerSession<R, W>, AdmissionError>
    where
        R: FrameReader,
        W: FrameWriter,
    {
        let user_id = match read_join(&mut reader, self.settings().join_timeout).await {
            Ok(user_id) => user_id,
            Err(e) => {
                writer.close().await;
                return Err(e);
            }
        };

        let (peer, outbound_rx) =
            PeerConnection::channel(user_id.clone(), self.settings().queue_capacity);
        let connection_id = peer.connection_id();

        match self.register(peer).await {
            Ok(()) => {
                info!("Peer {} admitted ({})", user_id, connection_id);
                Ok(PeerSession::new(
                    user_id,
                    connection_id,
                    reader,
                    writer,
                    outbound_rx,
                    self.clone(),
                ))
            }
            Err(e) => {
                if matches!(e, AdmissionError::IdentityTaken(_)) {
                    if let Ok(json) = SignalMessage::error(IDENTITY_TAKEN_MESSAGE).encode() {
                        let _ = writer.send_frame(Frame::from(json)).await;
                    }
                }
                writer.close().await;
                Err(e)
            }
        }
    }
}

async fn read_join<R: FrameReader>(
    reader: &mut R,
    join_timeout: Duration,
) -> Result<UserId, AdmissionError> {
    let frame = match tokio::time::timeout(join_timeout, reader.next_frame()).await {
        Err(_) => return Err(AdmissionError::JoinTimeout(join_timeout)),
        Ok(None) => return Err(AdmissionError::ClosedBeforeJoin),
        Ok(Some(Err(e))) => return Err(e.into()),
        Ok(Some(Ok(frame))) => frame,
    };

    let message = SignalMessage::decode(frame.as_str())?;
    if !matches!(message.payload, Payload::Join(_)) {
        return Err(AdmissionError::NotJoin(message.kind().to_owned()));
    }

    message
        .join_identity()
        .cloned()
        .ok_or(AdmissionError::EmptyIdentity)
}
