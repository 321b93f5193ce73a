//! Shared application state for the Talkboard API server.
//!
//! [`AppState`] holds the injected [`NotificationHub`] plus the two
//! pieces of serving policy the handlers need: the long-poll deadline
//! and the static asset directory. Wrapped in [`Arc`] and injected via
//! Axum's `State` extractor; tests build isolated instances with a short
//! deadline.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use talkboard_hub::NotificationHub;

/// Server-side long-poll deadline. A policy constant, not a
/// client-supplied parameter.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(90);

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The process-wide notification hub.
    pub hub: Arc<NotificationHub>,
    /// How long a long-poll read may stay parked before it resolves
    /// empty.
    pub wait_timeout: Duration,
    /// Directory the static file fallback serves the browser client
    /// from.
    pub public_dir: PathBuf,
}

impl AppState {
    /// Create application state around a hub with the default long-poll
    /// deadline.
    pub fn new(hub: Arc<NotificationHub>, public_dir: PathBuf) -> Self {
        Self {
            hub,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            public_dir,
        }
    }

    /// Override the long-poll deadline (tests use a short one).
    #[must_use]
    pub const fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }
}
