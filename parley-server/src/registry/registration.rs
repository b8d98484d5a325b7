use crate::peer::ConnectionId;
use crate::registry::RegistryHandle;
use parley_core::UserId;

/// Ownership of one live registry entry.
///
/// Dropping it without [`Registration::release`] still unregisters, so an
/// admitted connection that is never run, or whose session is cancelled,
/// cannot keep its identity forever.
pub(crate) struct Registration {
    registry: RegistryHandle,
    user_id: UserId,
    connection_id: ConnectionId,
    released: bool,
}

impl Registration {
    pub(crate) fn new(registry: RegistryHandle, user_id: UserId, connection_id: ConnectionId) -> Self {
        Self {
            registry,
            user_id,
            connection_id,
            released: false,
        }
    }

    pub(crate) fn registry(&self) -> &RegistryHandle {
        &self.registry
    }

    /// Unregister now and disarm the drop path.
    pub(crate) async fn release(&mut self) {
        if self.released {
            return;
        }
        self.registry
            .unregister(self.user_id.clone(), self.connection_id)
            .await;
        self.released = true;
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if !self.released {
            self.registry
                .unregister_detached(self.user_id.clone(), self.connection_id);
        }
    }
}
