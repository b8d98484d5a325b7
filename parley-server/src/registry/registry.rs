use crate::error::AdmissionError;
use crate::peer::{ConnectionId, PeerConnection};
use crate::registry::{RegistryCommand, RegistryHandle, RegistrySettings};
use crate::transport::Frame;
use dashmap::DashSet;
use parley_core::{Payload, SignalMessage, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

const COMMAND_CHANNEL_CAPACITY: usize = 1024;

/// The connection registry actor.
///
/// Owns the identity table exclusively. Every membership change and every
/// routing decision goes through [`Registry::run`], which gives all of them a
/// single global order.
pub struct Registry {
    /// Live connections by identity. At most one per identity.
    peers: HashMap<UserId, PeerConnection>,

    command_rx: mpsc::Receiver<RegistryCommand>,

    /// Read-only mirror of the identity set for advisory queries from
    /// outside the loop.
    directory: Arc<DashSet<UserId>>,
}

impl Registry {
    pub fn new(settings: RegistrySettings) -> (Self, RegistryHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let directory = Arc::new(DashSet::new());

        let registry = Self {
            peers: HashMap::new(),
            command_rx,
            directory: directory.clone(),
        };
        let handle = RegistryHandle::new(command_tx, directory, settings);

        (registry, handle)
    }

    /// Main event loop. Runs until every [`RegistryHandle`] is dropped.
    pub async fn run(mut self) {
        info!("Registry event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Command channel closed. Registry event loop finished");
    }

    fn handle_command(&mut self, cmd: RegistryCommand) {
        match cmd {
            RegistryCommand::Register { peer, reply } => self.register(peer, reply),

            RegistryCommand::Unregister {
                user_id,
                connection_id,
            } => self.unregister(&user_id, connection_id),

            RegistryCommand::Route { message } => self.route(message),
        }
    }

    fn register(
        &mut self,
        peer: PeerConnection,
        reply: oneshot::Sender<Result<(), AdmissionError>>,
    ) {
        let user_id = peer.user_id().clone();

        if self.peers.contains_key(&user_id) {
            warn!("Rejecting join: identity {} is already connected", user_id);
            let _ = reply.send(Err(AdmissionError::IdentityTaken(user_id)));
            return;
        }

        let connection_id = peer.connection_id();
        self.peers.insert(user_id.clone(), peer);
        self.directory.insert(user_id.clone());

        if reply.send(Ok(())).is_err() {
            // Nobody is left to run the session, so nobody would ever unregister it.
            warn!("Admission of {} was abandoned, rolling back", user_id);
            self.peers.remove(&user_id);
            self.directory.remove(&user_id);
            return;
        }

        info!(
            "Client registered: {} ({}), {} online",
            user_id,
            connection_id,
            self.peers.len()
        );
        self.broadcast_user_list();
    }

    fn unregister(&mut self, user_id: &UserId, connection_id: ConnectionId) {
        let is_current = self
            .peers
            .get(user_id)
            .is_some_and(|peer| peer.connection_id() == connection_id);

        if !is_current {
            debug!("Unregister for {} ({}) ignored: not live", user_id, connection_id);
            return;
        }

        // Dropping the connection closes its outbound queue.
        self.peers.remove(user_id);
        self.directory.remove(user_id);

        info!(
            "Client unregistered: {} ({}), {} online",
            user_id,
            connection_id,
            self.peers.len()
        );
        self.broadcast_user_list();
    }

    fn route(&self, message: SignalMessage) {
        let sender = message
            .from
            .as_ref()
            .map(UserId::as_str)
            .unwrap_or("<unknown>");

        if !message.payload.is_directed() {
            match &message.payload {
                Payload::Unknown(kind) => warn!("Unknown message type `{}` from {}", kind, sender),
                _ => warn!("Ignoring `{}` from {}: not relayable", message.kind(), sender),
            }
            return;
        }

        let Some(target) = message.target() else {
            warn!("Dropping `{}` from {}: no target", message.kind(), sender);
            return;
        };

        let Some(peer) = self.peers.get(target) else {
            warn!(
                "Dropping `{}` from {}: target {} not found",
                message.kind(),
                sender,
                target
            );
            return;
        };

        debug!("Relaying `{}` from {} to {}", message.kind(), sender, target);
        peer.send(&message);
    }

    /// Send the current identity set to every connected peer.
    fn broadcast_user_list(&self) {
        let mut users: Vec<UserId> = self.peers.keys().cloned().collect();
        users.sort();

        let frame = match SignalMessage::user_list(users).encode() {
            Ok(json) => Frame::from(json),
            Err(e) => {
                error!("Failed to serialize user list: {}", e);
                return;
            }
        };

        for peer in self.peers.values() {
            peer.send_frame(frame.clone());
        }
    }
}
