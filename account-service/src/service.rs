//! Account service implementation

use std::sync::Arc;

use common::error::{ErrorExt, Result};
use common::model::account::{Account, AccountCreate, AccountUpdate};
use common::Context;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::{AccountServiceConfig, StorageKind};
use crate::repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};

/// Account service for managing stored account records
///
/// Delegates every operation to the configured repository. Failures are
/// logged and returned with added context; the error category is unchanged.
#[derive(Clone)]
pub struct AccountService {
    /// Repository for account data
    repo: Arc<dyn AccountRepository>,
    /// Backend behind `repo`
    storage: StorageKind,
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountService {
    /// Create a new account service backed by an in-memory repository
    pub fn new() -> Self {
        Self {
            repo: Arc::new(InMemoryAccountRepository::new()),
            storage: StorageKind::Memory,
        }
    }

    /// Create a new account service over an existing repository
    pub fn from_repository(repo: Arc<dyn AccountRepository>, storage: StorageKind) -> Self {
        Self { repo, storage }
    }

    /// Create a new account service with a configuration
    pub async fn with_config(config: &AccountServiceConfig) -> Result<Self> {
        config.validate()?;

        info!("Initializing account service with {} storage", config.storage);

        match config.storage {
            StorageKind::Memory => Ok(Self::new()),
            StorageKind::Postgres => Ok(Self::from_repository(
                Arc::new(PostgresAccountRepository::with_config(config).await?),
                StorageKind::Postgres,
            )),
        }
    }

    /// The storage backend in use
    pub fn storage(&self) -> StorageKind {
        self.storage
    }

    /// Create a new account and return its ID
    pub async fn create_account(&self, ctx: &Context, account: AccountCreate) -> Result<Uuid> {
        let name = account.name.clone();

        self.repo
            .create(ctx, account)
            .await
            .inspect(|id| info!(account_id = %id, "Created account"))
            .inspect_err(|e| {
                error!(
                    operation = "create_account",
                    error = %e,
                    account_name = %name,
                    "creating account failed"
                )
            })
            .with_context(|| "Failed to create account")
    }

    /// Get an account by ID
    pub async fn get_account(&self, ctx: &Context, id: Uuid) -> Result<Account> {
        self.repo
            .get_by_id(ctx, id)
            .await
            .inspect_err(|e| {
                error!(
                    operation = "get_account",
                    error = %e,
                    account_id = %id,
                    "getting account by id failed"
                )
            })
            .with_context(|| format!("Failed to retrieve account {}", id))
    }

    /// Apply a partial update to an account
    pub async fn update_account(&self, ctx: &Context, id: Uuid, update: AccountUpdate) -> Result<()> {
        self.repo
            .update(ctx, id, update)
            .await
            .inspect_err(|e| {
                error!(
                    operation = "update_account",
                    error = %e,
                    account_id = %id,
                    "updating account failed"
                )
            })
            .with_context(|| format!("Failed to update account {}", id))
    }

    /// Delete an account
    pub async fn delete_account(&self, ctx: &Context, id: Uuid) -> Result<()> {
        self.repo
            .delete(ctx, id)
            .await
            .inspect_err(|e| {
                error!(
                    operation = "delete_account",
                    error = %e,
                    account_id = %id,
                    "deleting account failed"
                )
            })
            .with_context(|| format!("Failed to delete account {}", id))
    }

    /// List all accounts
    pub async fn list_accounts(&self, ctx: &Context) -> Result<Vec<Account>> {
        self.repo
            .get_all(ctx)
            .await
            .inspect_err(|e| error!(operation = "list_accounts", error = %e, "getting all accounts failed"))
            .with_context(|| "Failed to list accounts")
    }
}
