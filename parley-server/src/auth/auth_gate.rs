use crate::config::ServerConfig;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("Access denied: IP not in whitelist")]
    IpNotAllowed,

    #[error("Invalid API key")]
    InvalidApiKey,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let status = match self {
            AuthRejection::IpNotAllowed => StatusCode::FORBIDDEN,
            AuthRejection::InvalidApiKey => StatusCode::UNAUTHORIZED,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Admission check applied before a connection reaches the registry.
pub trait AuthGate: Send + Sync + 'static {
    fn check(&self, client_addr: &str, credential: Option<&str>) -> Result<(), AuthRejection>;

    fn allow(&self, client_addr: &str, credential: Option<&str>) -> bool {
        self.check(client_addr, credential).is_ok()
    }
}

/// Shared-secret check combined with an optional address allowlist.
#[derive(Clone)]
pub struct ApiKeyGate {
    api_key: String,
    allowed_ips: Vec<String>,
    enforce_whitelist: bool,
}

impl ApiKeyGate {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            allowed_ips: config.allowed_ips.clone(),
            enforce_whitelist: config.enable_ip_whitelist,
        }
    }

    /// Always true when the allowlist is disabled or empty.
    pub fn is_ip_allowed(&self, client_addr: &str) -> bool {
        if !self.enforce_whitelist || self.allowed_ips.is_empty() {
            return true;
        }
        let host = strip_port(client_addr);
        self.allowed_ips.iter().any(|allowed| *allowed == host)
    }

    pub fn is_key_valid(&self, credential: Option<&str>) -> bool {
        credential.is_some_and(|key| key == self.api_key)
    }
}

impl AuthGate for ApiKeyGate {
    fn check(&self, client_addr: &str, credential: Option<&str>) -> Result<(), AuthRejection> {
        if !self.is_ip_allowed(client_addr) {
            return Err(AuthRejection::IpNotAllowed);
        }
        if !self.is_key_valid(credential) {
            return Err(AuthRejection::InvalidApiKey);
        }
        Ok(())
    }
}

/// `10.0.0.1:5000` and `[::ffff:10.0.0.1]:5000` both become `10.0.0.1`.
fn strip_port(addr: &str) -> String {
    if let Ok(socket) = addr.parse::<SocketAddr>() {
        return socket.ip().to_canonical().to_string();
    }
    if let Ok(ip) = addr.parse::<IpAddr>() {
        return ip.to_canonical().to_string();
    }
    match addr.rsplit_once(':') {
        Some((host, _port)) => host.to_owned(),
        None => addr.to_owned(),
    }
}
