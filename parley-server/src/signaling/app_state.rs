use crate::auth::{ApiKeyGate, AuthGate};
use crate::config::ServerConfig;
use crate::registry::RegistryHandle;
use std::sync::Arc;

/// Shared state behind every HTTP route.
#[derive(Clone)]
pub struct AppState {
    pub registry: RegistryHandle,
    pub auth: Arc<dyn AuthGate>,
}

impl AppState {
    /// Spawn the registry and build the API-key gate from `config`.
    /// Must be called from within a tokio runtime.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            registry: RegistryHandle::spawn(config.registry.clone()),
            auth: Arc::new(ApiKeyGate::new(config)),
        }
    }

    pub fn with_auth(registry: RegistryHandle, auth: Arc<dyn AuthGate>) -> Self {
        Self { registry, auth }
    }
}
