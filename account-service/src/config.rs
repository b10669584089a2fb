//! Configuration for the account service

use std::env;
use std::fmt;
use std::str::FromStr;

use common::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default connection pool size for the PostgreSQL backend
pub const DEFAULT_DB_POOL_SIZE: u32 = 5;

/// Storage backend used by the account service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// PostgreSQL table
    Postgres,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Memory => "memory",
            StorageKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "local" | "in-memory" => Ok(StorageKind::Memory),
            "postgres" | "postgresql" | "sql" => Ok(StorageKind::Postgres),
            other => Err(Error::ConfigurationError(format!("unknown database type: {}", other))),
        }
    }
}

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Storage backend
    pub storage: StorageKind,
    /// Database URL, required for the PostgreSQL backend
    pub database_url: Option<String>,
    /// Database connection pool size
    pub db_pool_size: u32,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::Memory,
            database_url: None,
            db_pool_size: DEFAULT_DB_POOL_SIZE,
        }
    }
}

impl AccountServiceConfig {
    /// Create a new configuration using environment variables
    ///
    /// Reads `DATABASE_TYPE`, `DATABASE_URL` and `DB_POOL_SIZE`. Values are
    /// parsed but not validated, so callers can apply overrides first.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create a new configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage = match lookup("DATABASE_TYPE") {
            Some(value) => value.parse()?,
            None => StorageKind::default(),
        };

        let db_pool_size = match lookup("DB_POOL_SIZE") {
            Some(value) => value.trim().parse().map_err(|_| {
                Error::ConfigurationError(format!("DB_POOL_SIZE must be a positive integer, got {}", value))
            })?,
            None => DEFAULT_DB_POOL_SIZE,
        };

        Ok(Self {
            storage,
            database_url: lookup("DATABASE_URL"),
            db_pool_size,
        })
    }

    /// Configuration for the in-memory backend
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Configuration for the PostgreSQL backend
    pub fn postgres(database_url: impl Into<String>, db_pool_size: u32) -> Self {
        Self {
            storage: StorageKind::Postgres,
            database_url: Some(database_url.into()),
            db_pool_size,
        }
    }

    /// Check that the configuration is usable for the selected backend
    pub fn validate(&self) -> Result<()> {
        if self.db_pool_size == 0 {
            return Err(Error::ConfigurationError("DB_POOL_SIZE must be greater than zero".to_string()));
        }

        if self.storage == StorageKind::Postgres
            && self.database_url.as_deref().map_or(true, |url| url.trim().is_empty())
        {
            return Err(Error::ConfigurationError(
                "DATABASE_URL must be set for the postgres backend".to_string(),
            ));
        }

        Ok(())
    }
}
