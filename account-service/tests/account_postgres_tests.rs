use account_service::{AccountRepository, PostgresAccountRepository};
use common::model::account::{AccountCreate, AccountUpdate};
use common::{Context, Error};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::test;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

// PostgreSQL integration tests for the account repository
// These tests require a running PostgreSQL database
// Run with: cargo test --test account_postgres_tests -- --ignored

const SCHEMA: &str = include_str!("../sql/accounts.sql");

async fn create_test_repository() -> anyhow::Result<PostgresAccountRepository> {
    dotenv().ok();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run PostgreSQL tests");

    let pool = PgPoolOptions::new().max_connections(5).connect(&database_url).await?;
    sqlx::raw_sql(SCHEMA).execute(&pool).await?;

    Ok(PostgresAccountRepository::from_pool(pool))
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_create_and_get() -> anyhow::Result<()> {
    let repo = create_test_repository().await?;
    let ctx = Context::background();

    let input = AccountCreate {
        name: "A".to_string(),
        login: "alice".to_string(),
        email_password: "mailpass".to_string(),
        status: "active".to_string(),
        ..Default::default()
    };
    let id = repo.create(&ctx, input).await?;
    assert!(id != Uuid::nil());

    let account = repo.get_by_id(&ctx, id).await?;
    assert_eq!(account.id, id);
    assert_eq!(account.name, "A");
    assert_eq!(account.login, "alice");
    assert_eq!(account.email_password, "mailpass");
    assert_eq!(account.status, "active");
    assert!(account.cookie.is_empty());

    repo.delete(&ctx, id).await?;
    Ok(())
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_update_merges_fields() -> anyhow::Result<()> {
    let repo = create_test_repository().await?;
    let ctx = Context::background();

    let input = AccountCreate {
        name: "A".to_string(),
        status: "active".to_string(),
        ..Default::default()
    };
    let id = repo.create(&ctx, input).await?;
    let before = repo.get_by_id(&ctx, id).await?;

    repo.update(&ctx, id, AccountUpdate::default()).await?;
    assert_eq!(repo.get_by_id(&ctx, id).await?, before);

    let update = AccountUpdate {
        name: "B".to_string(),
        ..Default::default()
    };
    repo.update(&ctx, id, update).await?;

    let after = repo.get_by_id(&ctx, id).await?;
    assert_eq!(after.name, "B");
    assert_eq!(after.status, "active");
    assert_eq!(after.created_at, before.created_at);

    repo.delete(&ctx, id).await?;
    Ok(())
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_missing_ids_are_not_found() -> anyhow::Result<()> {
    let repo = create_test_repository().await?;
    let ctx = Context::background();
    let missing = Uuid::new_v4();

    assert!(matches!(repo.get_by_id(&ctx, missing).await, Err(Error::AccountNotFound(_))));
    assert!(matches!(
        repo.update(&ctx, missing, AccountUpdate::default()).await,
        Err(Error::AccountNotFound(_))
    ));
    assert!(matches!(repo.delete(&ctx, missing).await, Err(Error::AccountNotFound(_))));

    let id = repo.create(&ctx, AccountCreate::default()).await?;
    repo.delete(&ctx, id).await?;
    assert!(matches!(repo.get_by_id(&ctx, id).await, Err(Error::AccountNotFound(_))));
    Ok(())
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_get_all_includes_created() -> anyhow::Result<()> {
    let repo = create_test_repository().await?;
    let ctx = Context::background();

    let id = repo.create(&ctx, AccountCreate::default()).await?;
    let accounts = repo.get_all(&ctx).await?;
    assert!(accounts.iter().any(|a| a.id == id));

    repo.delete(&ctx, id).await?;
    Ok(())
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_cancelled_context() -> anyhow::Result<()> {
    let repo = create_test_repository().await?;

    let shutdown = CancellationToken::new();
    let ctx = Context::from_parent(&shutdown);
    shutdown.cancel();

    let err = repo.create(&ctx, AccountCreate::default()).await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(repo.get_all(&ctx).await.unwrap_err().is_cancelled());
    Ok(())
}
