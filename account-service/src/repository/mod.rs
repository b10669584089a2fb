//! Repository for account data

mod memory;
mod postgres;

use async_trait::async_trait;
use common::error::Result;
use common::model::account::{Account, AccountCreate, AccountUpdate};
use common::Context;
use uuid::Uuid;

pub use memory::InMemoryAccountRepository;
pub use postgres::PostgresAccountRepository;

/// Account repository trait defining the interface for account data storage
///
/// Every operation fails with `Error::Cancelled` when `ctx` is already done,
/// and with `Error::AccountNotFound` when it targets an id that is not stored.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store a new account and return its generated ID
    async fn create(&self, ctx: &Context, account: AccountCreate) -> Result<Uuid>;

    /// Get an account by ID
    async fn get_by_id(&self, ctx: &Context, id: Uuid) -> Result<Account>;

    /// Merge the non-empty fields of `update` into the stored account
    async fn update(&self, ctx: &Context, id: Uuid, update: AccountUpdate) -> Result<()>;

    /// Delete an account
    async fn delete(&self, ctx: &Context, id: Uuid) -> Result<()>;

    /// Get every stored account, in no particular order
    async fn get_all(&self, ctx: &Context) -> Result<Vec<Account>>;
}

pub(crate) fn not_found(id: Uuid) -> common::Error {
    common::Error::AccountNotFound(format!("no account with id {}", id))
}
