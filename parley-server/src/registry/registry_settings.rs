use std::time::Duration;

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-connection limits applied by the registry.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    /// Frames a peer's outbound queue holds before new ones are dropped.
    pub queue_capacity: usize,
    /// How long a new connection may take to send its join frame.
    pub join_timeout: Duration,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            join_timeout: DEFAULT_JOIN_TIMEOUT,
        }
    }
}
