//! Server configuration.
//!
//! # Environment Variables
//!
//! - `HOST`: listen address (default: `0.0.0.0`)
//! - `PORT`: listen port (default: `8080`)
//! - `WORKER_THREADS`: tokio worker threads (default: logical CPU count)
//! - `LOG_FORMAT`: `text` (default) | `json`
//!
//! Storage settings are read separately by
//! [`RepositoryConfig::from_env`](crate::infrastructure::RepositoryConfig::from_env).

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// Configuration Types
// =============================================================================

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ServerConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ServerConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Listener, runtime and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Tokio worker threads; `None` keeps the runtime default.
    pub worker_threads: Option<usize>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            worker_threads: None,
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ServerConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ServerConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ServerConfigError> {
        let present = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = present("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = present("PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|_| ServerConfigError::InvalidPort(value))
            })
            .transpose()?
            .unwrap_or(DEFAULT_PORT);

        let worker_threads = present("WORKER_THREADS")
            .map(|value| parse_worker_threads(&value))
            .transpose()?;

        let log_format = present("LOG_FORMAT")
            .map(|value| value.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        let config = Self {
            host,
            port,
            worker_threads,
            log_format,
        };

        config.socket_address()?;
        Ok(config)
    }

    /// Returns the address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ServerConfigError::InvalidAddress`] if `host:port` is not a
    /// socket address.
    pub fn socket_address(&self) -> Result<SocketAddr, ServerConfigError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ServerConfigError::InvalidAddress(address))
    }
}

/// Parses `WORKER_THREADS`, capping it at four threads per logical CPU.
fn parse_worker_threads(value: &str) -> Result<usize, ServerConfigError> {
    let threads = value
        .parse::<usize>()
        .ok()
        .filter(|threads| *threads > 0)
        .ok_or_else(|| ServerConfigError::InvalidWorkerThreads(value.to_string()))?;

    let max_threads = std::thread::available_parallelism()
        .map(|parallelism| parallelism.get().saturating_mul(4))
        .unwrap_or(64);

    Ok(threads.min(max_threads))
}

/// Builder for `ServerConfig`.
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Sets the listen host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the listen port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the worker thread count.
    #[must_use]
    pub const fn worker_threads(mut self, threads: usize) -> Self {
        self.config.worker_threads = Some(threads);
        self
    }

    /// Sets the log format.
    #[must_use]
    pub const fn log_format(mut self, format: LogFormat) -> Self {
        self.config.log_format = format;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerConfigError`] for an unusable address or a zero
    /// thread count.
    pub fn build(self) -> Result<ServerConfig, ServerConfigError> {
        if self.config.worker_threads == Some(0) {
            return Err(ServerConfigError::InvalidWorkerThreads("0".to_string()));
        }

        self.config.socket_address()?;
        Ok(self.config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading server configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServerConfigError {
    /// `PORT` is not a 16-bit unsigned integer.
    #[error("Invalid PORT: '{0}'. Expected an integer between 0 and 65535")]
    InvalidPort(String),

    /// `HOST` and `PORT` do not form a socket address.
    #[error("Invalid server address: '{0}'")]
    InvalidAddress(String),

    /// `WORKER_THREADS` is not a positive integer.
    #[error("Invalid WORKER_THREADS: '{0}'. Expected a positive integer")]
    InvalidWorkerThreads(String),

    /// `LOG_FORMAT` is not recognized.
    #[error("Invalid LOG_FORMAT: '{0}'. Expected 'text' or 'json'")]
    InvalidLogFormat(String),
}

// =============================================================================
// Tests
// =============================================================================
