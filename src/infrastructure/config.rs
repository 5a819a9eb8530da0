//! Server configuration management.
//!
//! Configuration is read once at startup from environment variables. Every
//! loader also has a `from_lookup` form that takes the variable source as a
//! closure, so tests never need to mutate the process environment.
//!
//! # Environment Variables
//!
//! - `IP` (or `HOST`): bind address (default: `0.0.0.0`)
//! - `PORT`: bind port (default: `8080`)

use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory', 'json_file' or 'mongo'")]
    InvalidStorageMode(String),

    /// A variable is set but its value cannot be used.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Reads a variable, treating empty or whitespace-only values as unset.
pub(crate) fn lookup_trimmed<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub host: String,
    /// Port the listener binds to.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if `PORT` is not a valid
    /// port number or the host is not an IP address.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    ///
    /// `IP` wins over `HOST` when both are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if `PORT` is not a valid
    /// port number or the host is not an IP address.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup_trimmed(&lookup, "IP")
            .or_else(|| lookup_trimmed(&lookup, "HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        if host.parse::<IpAddr>().is_err() {
            return Err(ConfigurationError::InvalidValue {
                key: "IP".to_string(),
                message: format!("'{host}' is not an IP address"),
            });
        }

        let port = match lookup_trimmed(&lookup, "PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|error| ConfigurationError::InvalidValue {
                    key: "PORT".to_string(),
                    message: format!("'{value}': {error}"),
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    /// Returns the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if the host is not an IP address.
    pub fn socket_address(&self) -> Result<SocketAddr, ConfigurationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigurationError::InvalidValue {
                key: "IP".to_string(),
                message: format!("'{}' is not an IP address", self.host),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

// =============================================================================
// Tests
// =============================================================================
