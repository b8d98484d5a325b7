//! `parley`: signaling relay server.
//!
//! Every option can also come from the environment:
//!
//! ```bash
//! SERVER_PORT=9000 API_KEY=change-me ENABLE_IP_WHITELIST=true ALLOWED_IPS=10.0.0.5,10.0.0.6 parley
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use parley::server::{AppState, RegistrySettings, ServerConfig, serve, DEFAULT_QUEUE_CAPACITY};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "parley=info,parley_server=info,tower_http=info";

/// WebRTC signaling relay
#[derive(Parser, Debug)]
#[command(name = "parley", version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0", env = "SERVER_HOST")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080, env = "SERVER_PORT")]
    port: u16,

    /// Shared key clients must present (query `api_key`, `X-API-Key` or bearer token)
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Client addresses allowed to connect (comma-separated)
    #[arg(long, value_delimiter = ',', env = "ALLOWED_IPS")]
    allowed_ips: Vec<String>,

    /// Enforce the address allowlist
    #[arg(
        long,
        default_value_t = false,
        action = clap::ArgAction::Set,
        env = "ENABLE_IP_WHITELIST"
    )]
    enable_ip_whitelist: bool,

    /// Frames buffered per connection before new ones are dropped
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY, env = "OUTBOUND_QUEUE_CAPACITY")]
    queue_capacity: usize,

    /// Seconds a new connection has to send its join message
    #[arg(long, default_value_t = 10, env = "JOIN_TIMEOUT_SECS")]
    join_timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig::new(SocketAddr::new(self.host, self.port), self.api_key)
            .with_ip_whitelist(self.enable_ip_whitelist, self.allowed_ips)
            .with_registry(RegistrySettings {
                queue_capacity: self.queue_capacity,
                join_timeout: Duration::from_secs(self.join_timeout_secs),
            })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("Initializing signaling server...");

    let config = Args::parse().into_config();
    config.log_summary();

    let state = AppState::new(&config);
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    serve(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
