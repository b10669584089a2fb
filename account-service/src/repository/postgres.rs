//! PostgreSQL account repository

use async_trait::async_trait;
use chrono::Utc;
use common::error::{Error, Result};
use common::model::account::{Account, AccountCreate, AccountUpdate};
use common::Context;
use futures::TryStreamExt;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::{debug, info};
use uuid::Uuid;

use super::{not_found, AccountRepository};
use crate::config::AccountServiceConfig;

const ACCOUNT_COLUMNS: &str = "id, name, account_type, login, password, email, email_password, \
     recovery_email, recovery_email_password, cookie, status, created_at";

/// PostgreSQL repository for account data
///
/// Each operation runs exactly one statement against the `accounts` table.
/// Cancelling the operation context drops the in-flight query.
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Connect to `database_url` with a pool of `pool_size` connections
    pub async fn connect(database_url: &str, pool_size: u32) -> Result<Self> {
        info!("Connecting to PostgreSQL database with pool size: {}", pool_size);

        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .connect(database_url)
            .await?;

        info!("Connected to PostgreSQL database");

        Ok(Self::from_pool(pool))
    }

    /// Create a new PostgreSQL account repository with configuration
    pub async fn with_config(config: &AccountServiceConfig) -> Result<Self> {
        config.validate()?;

        let database_url = config
            .database_url
            .as_deref()
            .ok_or_else(|| Error::ConfigurationError("DATABASE_URL must be set".to_string()))?;

        Self::connect(database_url, config.db_pool_size).await
    }

    /// Wrap an existing connection pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(row: &PgRow) -> Result<Account> {
    Ok(Account {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        account_type: row.try_get("account_type")?,
        login: row.try_get("login")?,
        password: row.try_get("password")?,
        email: row.try_get("email")?,
        email_password: row.try_get("email_password")?,
        recovery_email: row.try_get("recovery_email")?,
        recovery_email_password: row.try_get("recovery_email_password")?,
        cookie: row.try_get("cookie")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, ctx: &Context, account: AccountCreate) -> Result<Uuid> {
        debug!("Creating new account in database");

        let id = Uuid::new_v4();
        let created_at = Utc::now();

        ctx.run(async {
            let row = sqlx::query(
                "INSERT INTO accounts (id, name, account_type, login, password, email, email_password,
                    recovery_email, recovery_email_password, cookie, status, created_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                 RETURNING id",
            )
            .bind(id)
            .bind(&account.name)
            .bind(&account.account_type)
            .bind(&account.login)
            .bind(&account.password)
            .bind(&account.email)
            .bind(&account.email_password)
            .bind(&account.recovery_email)
            .bind(&account.recovery_email_password)
            .bind(&account.cookie)
            .bind(&account.status)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;

            let id: Uuid = row.try_get("id")?;
            Ok::<_, Error>(id)
        })
        .await
    }

    async fn get_by_id(&self, ctx: &Context, id: Uuid) -> Result<Account> {
        debug!("Getting account from database: {}", id);

        ctx.run(async {
            let row = sqlx::query(&format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

            match row {
                Some(row) => account_from_row(&row),
                None => Err(not_found(id)),
            }
        })
        .await
    }

    async fn update(&self, ctx: &Context, id: Uuid, update: AccountUpdate) -> Result<()> {
        debug!("Updating account in database: {}", id);

        ctx.run(async {
            // Empty strings keep the stored value
            let result = sqlx::query(
                "UPDATE accounts SET
                    name = COALESCE(NULLIF($2, ''), name),
                    account_type = COALESCE(NULLIF($3, ''), account_type),
                    login = COALESCE(NULLIF($4, ''), login),
                    password = COALESCE(NULLIF($5, ''), password),
                    email = COALESCE(NULLIF($6, ''), email),
                    email_password = COALESCE(NULLIF($7, ''), email_password),
                    recovery_email = COALESCE(NULLIF($8, ''), recovery_email),
                    recovery_email_password = COALESCE(NULLIF($9, ''), recovery_email_password),
                    cookie = COALESCE(NULLIF($10, ''), cookie),
                    status = COALESCE(NULLIF($11, ''), status)
                 WHERE id = $1",
            )
            .bind(id)
            .bind(&update.name)
            .bind(&update.account_type)
            .bind(&update.login)
            .bind(&update.password)
            .bind(&update.email)
            .bind(&update.email_password)
            .bind(&update.recovery_email)
            .bind(&update.recovery_email_password)
            .bind(&update.cookie)
            .bind(&update.status)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }

            Ok(())
        })
        .await
    }

    async fn delete(&self, ctx: &Context, id: Uuid) -> Result<()> {
        debug!("Deleting account from database: {}", id);

        ctx.run(async {
            let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }

            Ok(())
        })
        .await
    }

    async fn get_all(&self, ctx: &Context) -> Result<Vec<Account>> {
        debug!("Getting all accounts from database");

        ctx.run(async {
            let query = format!("SELECT {} FROM accounts", ACCOUNT_COLUMNS);
            let mut rows = sqlx::query(&query).fetch(&self.pool);

            let mut accounts = Vec::new();
            while let Some(row) = rows.try_next().await? {
                accounts.push(account_from_row(&row)?);
            }

            Ok::<_, Error>(accounts)
        })
        .await
    }
}
