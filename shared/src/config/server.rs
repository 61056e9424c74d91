//! Server configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Allowed browser origin for the frontend
    #[serde(default)]
    pub frontend_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 3000,
            workers: 0,
            frontend_url: None,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_or("SERVER_PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers),
            frontend_url: std::env::var("FRONTEND_URL").ok(),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Session record store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionStoreConfig {
    /// How often expired session records are swept (in seconds)
    pub cleanup_interval_seconds: u64,

    /// Whether the background sweep runs at all
    pub cleanup_enabled: bool,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            cleanup_interval_seconds: 600,
            cleanup_enabled: true,
        }
    }
}

impl SessionStoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cleanup_interval_seconds: env_or(
                "SESSION_CLEANUP_INTERVAL_SECONDS",
                defaults.cleanup_interval_seconds,
            ),
            cleanup_enabled: env_or("SESSION_CLEANUP_ENABLED", defaults.cleanup_enabled),
        }
    }
}
