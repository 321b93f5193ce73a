//! Talkboard service binary.
//!
//! Wires together the notification hub and the HTTP server: initializes
//! structured logging, loads `talkboard-config.yaml` (falling back to
//! defaults when absent), builds the process-wide
//! [`NotificationHub`](talkboard_hub::NotificationHub), and serves until
//! the process is terminated.

mod config;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use talkboard_hub::NotificationHub;
use talkboard_server::state::AppState;
use talkboard_server::{ServerConfig, start_server};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::DaemonConfig;

/// Path the daemon looks for its configuration at.
const CONFIG_PATH: &str = "talkboard-config.yaml";

/// Application entry point for the Talkboard daemon.
///
/// # Errors
///
/// Returns an error if the configuration file exists but cannot be
/// parsed, or if the server fails to bind or serve.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("talkboard-daemon starting");

    let config_path = Path::new(CONFIG_PATH);
    let config = if config_path.exists() {
        DaemonConfig::load(config_path)?
    } else {
        warn!(path = CONFIG_PATH, "config file not found, using defaults");
        DaemonConfig::default()
    };
    info!(
        host = config.server.host,
        port = config.server.port,
        public_dir = %config.server.public_dir.display(),
        wait_timeout_secs = config.poll.wait_timeout_secs,
        "Configuration loaded"
    );

    let hub = Arc::new(NotificationHub::new());
    let state = Arc::new(
        AppState::new(hub, config.server.public_dir.clone())
            .with_wait_timeout(Duration::from_secs(config.poll.wait_timeout_secs)),
    );

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server_config, state).await?;

    Ok(())
}
