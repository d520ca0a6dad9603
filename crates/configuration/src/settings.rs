use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Where the climate dataset lives and how the connection pool is sized.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite connection string, e.g. `sqlite://Resources/hawaii.sqlite`.
    pub url: String,
    pub max_connections: u32,
    /// How long a request waits for a pooled connection before failing.
    pub acquire_timeout_secs: u64,
}

/// The address the HTTP API binds to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Attach a permissive CORS layer. The API is read-only and public.
    pub cors: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    pub filter: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://Resources/hawaii.sqlite".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: None,
        }
    }
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl ServerSettings {
    /// Resolves `host:port` into a bindable socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| ConfigError::ValidationError(format!("invalid server address {}:{}: {e}", self.host, self.port)))?
            .next()
            .ok_or_else(|| ConfigError::ValidationError(format!("server address {}:{} did not resolve", self.host, self.port)))
    }
}

impl Config {
    /// Rejects settings the rest of the application cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError("database.url must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        self.server.socket_addr()?;
        Ok(())
    }
}
