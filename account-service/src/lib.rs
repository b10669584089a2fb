//! Account service for storing and managing account records

pub mod config;
pub mod repository;
pub mod service;

pub use config::{AccountServiceConfig, StorageKind};
pub use repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};
pub use service::AccountService;
