use crate::registry::RegistrySettings;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Shared secret used when none is configured. Only fit for local testing.
pub const DEFAULT_API_KEY: &str = "parley-default-key-change-in-production";

/// Immutable server configuration, built once at startup.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub api_key: String,
    pub allowed_ips: Vec<String>,
    pub enable_ip_whitelist: bool,
    pub registry: RegistrySettings,
}

impl ServerConfig {
    /// A missing or empty `api_key` falls back to [`DEFAULT_API_KEY`] with a warning.
    pub fn new(bind_addr: SocketAddr, api_key: Option<String>) -> Self {
        let api_key = match api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => key,
            None => {
                warn!("!!! API_KEY not set, using the built-in default key. NOT SECURE for production !!!");
                DEFAULT_API_KEY.to_owned()
            }
        };

        Self {
            bind_addr,
            api_key,
            allowed_ips: Vec::new(),
            enable_ip_whitelist: false,
            registry: RegistrySettings::default(),
        }
    }

    /// Entries are trimmed; blank entries are dropped.
    pub fn with_ip_whitelist(mut self, enabled: bool, allowed_ips: Vec<String>) -> Self {
        self.enable_ip_whitelist = enabled;
        self.allowed_ips = allowed_ips
            .into_iter()
            .map(|ip| ip.trim().to_owned())
            .filter(|ip| !ip.is_empty())
            .collect();
        self
    }

    pub fn with_registry(mut self, registry: RegistrySettings) -> Self {
        self.registry = registry;
        self
    }

    /// First and last four characters of the key, for logs.
    pub fn masked_api_key(&self) -> String {
        mask_secret(&self.api_key)
    }

    pub fn log_summary(&self) {
        info!("Server configuration loaded:");
        info!("  Listen address: {}", self.bind_addr);
        info!("  API key: {}", self.masked_api_key());
        info!("  IP whitelist enabled: {}", self.enable_ip_whitelist);
        if self.enable_ip_whitelist && !self.allowed_ips.is_empty() {
            info!("  Allowed IPs: {:?}", self.allowed_ips);
        }
        info!(
            "  Outbound queue capacity: {}, join timeout: {:?}",
            self.registry.queue_capacity, self.registry.join_timeout
        );
    }
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_owned();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
