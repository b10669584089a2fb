//! Application configuration

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use account_service::{AccountServiceConfig, StorageKind};
use common::error::{Error, Result};

/// Default listening address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
/// Default per-request storage timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default time allowed for draining connections on shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening address
    pub bind_addr: SocketAddr,
    /// Log level filter, e.g. `info` or `api_gateway=debug`
    pub log_level: String,
    /// Deadline applied to the storage operations of each request
    pub request_timeout: Duration,
    /// How long to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout: Duration,
    /// Storage backend configuration
    pub storage: AccountServiceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.parse().expect("default bind address is valid"),
            log_level: "info".to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            storage: AccountServiceConfig::default(),
        }
    }
}

/// Settings given on the command line, applied over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_addr: Option<SocketAddr>,
    pub log_level: Option<String>,
    pub storage: Option<StorageKind>,
    pub database_url: Option<String>,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    ///
    /// Reads `BIND_ADDR`, `LOG_LEVEL`, `DEBUG`, `REQUEST_TIMEOUT_SECS`,
    /// `SHUTDOWN_TIMEOUT_SECS` and the storage variables of
    /// [`AccountServiceConfig::from_env`]. Call [`AppConfig::validate`] once
    /// overrides have been applied.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create a new configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => parse_var("BIND_ADDR", &value)?,
            None => defaults.bind_addr,
        };

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => value,
            None if lookup("DEBUG").as_deref() == Some("1") => "debug".to_string(),
            None => defaults.log_level,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", &value)?),
            None => defaults.request_timeout,
        };

        let shutdown_timeout = match lookup("SHUTDOWN_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_var("SHUTDOWN_TIMEOUT_SECS", &value)?),
            None => defaults.shutdown_timeout,
        };

        Ok(Self {
            bind_addr,
            log_level,
            request_timeout,
            shutdown_timeout,
            storage: AccountServiceConfig::from_lookup(lookup)?,
        })
    }

    /// Replace environment values with any command line settings
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(addr) = overrides.bind_addr {
            self.bind_addr = addr;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        if let Some(storage) = overrides.storage {
            self.storage.storage = storage;
        }
        if let Some(url) = overrides.database_url {
            self.storage.database_url = Some(url);
        }
    }

    /// Check the configuration for values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(Error::ConfigurationError(
                "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        self.storage.validate()
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::ConfigurationError(format!("invalid value for {}: {}", name, value)))
}
