use crate::error::{AdmissionError, RegistryClosed};
use crate::peer::{ConnectionId, PeerConnection};
use crate::registry::{Registry, RegistryCommand, RegistrySettings};
use dashmap::DashSet;
use parley_core::{SignalMessage, UserId};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Cloneable entry point to a running [`Registry`].
#[derive(Clone)]
pub struct RegistryHandle {
    command_tx: mpsc::Sender<RegistryCommand>,
    directory: Arc<DashSet<UserId>>,
    settings: RegistrySettings,
}

impl RegistryHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<RegistryCommand>,
        directory: Arc<DashSet<UserId>>,
        settings: RegistrySettings,
    ) -> Self {
        Self {
            command_tx,
            directory,
            settings,
        }
    }

    /// Start a registry event loop on the current runtime.
    pub fn spawn(settings: RegistrySettings) -> Self {
        let (registry, handle) = Registry::new(settings);
        tokio::spawn(registry.run());
        handle
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    pub(crate) async fn register(&self, peer: PeerConnection) -> Result<(), AdmissionError> {
        let (reply, reply_rx) = oneshot::channel();
        self.command_tx
            .send(RegistryCommand::Register { peer, reply })
            .await
            .map_err(|_| RegistryClosed)?;
        reply_rx.await.map_err(|_| RegistryClosed)?
    }

    /// Ask the registry to drop a connection. A no-op if that connection is no
    /// longer the live one for `user_id`.
    pub async fn unregister(&self, user_id: UserId, connection_id: ConnectionId) {
        let cmd = RegistryCommand::Unregister {
            user_id,
            connection_id,
        };
        if self.command_tx.send(cmd).await.is_err() {
            warn!("Registry stopped before unregister");
        }
    }

    /// [`RegistryHandle::unregister`] for contexts that cannot await, such as
    /// `Drop`. Falls back to a spawned send when the command queue is full.
    pub(crate) fn unregister_detached(&self, user_id: UserId, connection_id: ConnectionId) {
        let cmd = RegistryCommand::Unregister {
            user_id,
            connection_id,
        };
        match self.command_tx.try_send(cmd) {
            Ok(()) => {}
            Err(TrySendError::Closed(_)) => debug!("Registry stopped before unregister"),
            Err(TrySendError::Full(cmd)) => match Handle::try_current() {
                Ok(runtime) => {
                    let command_tx = self.command_tx.clone();
                    runtime.spawn(async move {
                        let _ = command_tx.send(cmd).await;
                    });
                }
                Err(_) => warn!("Registry queue full and no runtime, unregister lost"),
            },
        }
    }

    /// Submit a message for delivery. Delivery itself is best effort: an
    /// unknown target or a full queue is not reported back.
    pub async fn route(&self, message: SignalMessage) -> Result<(), RegistryClosed> {
        self.command_tx
            .send(RegistryCommand::Route { message })
            .await
            .map_err(|_| RegistryClosed)
    }

    /// Identities currently connected, sorted. Advisory: it may lag the
    /// registry loop by a few events.
    pub fn snapshot(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.directory.iter().map(|id| id.key().clone()).collect();
        users.sort();
        users
    }

    pub fn connection_count(&self) -> usize {
        self.directory.len()
    }

    pub fn is_connected(&self, user_id: &str) -> bool {
        self.directory.contains(user_id)
    }
}
