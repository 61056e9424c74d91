//! Periodic sweep of expired session records
//!
//! Session records stop mattering once their access token has expired, but
//! nothing deletes them on the request path. This service removes them on
//! an interval.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use parley_shared::SessionStoreConfig;

use crate::errors::DomainError;
use crate::repositories::SessionRepository;

/// Configuration for session cleanup service
#[derive(Debug, Clone)]
pub struct SessionCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for SessionCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 600,
            enabled: true,
        }
    }
}

impl From<&SessionStoreConfig> for SessionCleanupConfig {
    fn from(config: &SessionStoreConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_seconds,
            enabled: config.cleanup_enabled,
        }
    }
}

/// Service for deleting expired session records
pub struct SessionCleanupService<S: SessionRepository + 'static> {
    repository: Arc<S>,
    config: SessionCleanupConfig,
}

impl<S: SessionRepository> SessionCleanupService<S> {
    pub fn new(repository: Arc<S>, config: SessionCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();
        match self.repository.delete_expired().await {
            Ok(count) => {
                result.expired_sessions_deleted = count;
                debug!(deleted = count, "expired session records removed");
            }
            Err(e) => {
                error!(error = %e, "failed to clean up expired sessions");
                result.errors.push(format!("Session cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Session cleanup service is disabled");
            return;
        }

        let period = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Session cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(period);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) if !result.is_success() => {
                        warn!("Cleanup completed with errors: {:?}", result.errors);
                    }
                    Ok(_) => {}
                    Err(e) => error!("Session cleanup cycle failed: {}", e),
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired session records deleted
    pub expired_sessions_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
