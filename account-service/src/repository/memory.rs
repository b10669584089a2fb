//! In-memory account repository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use common::error::Result;
use common::model::account::{Account, AccountCreate, AccountUpdate};
use common::Context;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{not_found, AccountRepository};

/// In-memory repository for account data
///
/// A single lock guards the whole map and is held for the full duration of
/// every operation. Data is lost when the repository is dropped.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    /// Accounts by ID
    accounts: Mutex<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
    /// Create a new in-memory account repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.lock().await.len()
    }

    /// Whether the repository holds no accounts
    pub async fn is_empty(&self) -> bool {
        self.accounts.lock().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, ctx: &Context, account: AccountCreate) -> Result<Uuid> {
        ctx.check()?;

        let mut accounts = self.accounts.lock().await;

        // v4 collisions are not expected, but the id must never overwrite a record
        let mut id = Uuid::new_v4();
        while accounts.contains_key(&id) {
            id = Uuid::new_v4();
        }

        accounts.insert(id, Account::new(id, account, Utc::now()));
        debug!(account_id = %id, "Created account in memory");

        Ok(id)
    }

    async fn get_by_id(&self, ctx: &Context, id: Uuid) -> Result<Account> {
        ctx.check()?;

        let accounts = self.accounts.lock().await;
        accounts.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn update(&self, ctx: &Context, id: Uuid, update: AccountUpdate) -> Result<()> {
        ctx.check()?;

        let mut accounts = self.accounts.lock().await;
        let account = accounts.get_mut(&id).ok_or_else(|| not_found(id))?;
        account.apply(&update);
        debug!(account_id = %id, "Updated account in memory");

        Ok(())
    }

    async fn delete(&self, ctx: &Context, id: Uuid) -> Result<()> {
        ctx.check()?;

        let mut accounts = self.accounts.lock().await;
        accounts.remove(&id).ok_or_else(|| not_found(id))?;
        debug!(account_id = %id, "Deleted account from memory");

        Ok(())
    }

    async fn get_all(&self, ctx: &Context) -> Result<Vec<Account>> {
        ctx.check()?;

        let accounts = self.accounts.lock().await;
        Ok(accounts.values().cloned().collect())
    }
}
