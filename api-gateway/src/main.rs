//! Accounts storage API server

use std::net::SocketAddr;
use std::sync::Arc;

use account_service::{AccountService, StorageKind};
use api_gateway::config::{AppConfig, Overrides};
use api_gateway::{app, logging, AppState};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Accounts storage API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (overrides BIND_ADDR)
    #[clap(short, long)]
    addr: Option<SocketAddr>,

    /// Log level or filter directives (overrides LOG_LEVEL)
    #[clap(short, long)]
    log_level: Option<String>,

    /// Storage backend: memory or postgres (overrides DATABASE_TYPE)
    #[clap(long)]
    database_type: Option<StorageKind>,

    /// Database URL (overrides DATABASE_URL)
    #[clap(long)]
    database_url: Option<String>,

    /// Emit logs as JSON
    #[clap(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let mut config = AppConfig::from_env()?;
    config.apply(Overrides {
        bind_addr: args.addr,
        log_level: args.log_level,
        storage: args.database_type,
        database_url: args.database_url,
    });
    config.validate()?;

    logging::init(&config.log_level, args.json_logs);

    info!(
        "Starting accounts storage with {} storage, request timeout {:?}",
        config.storage.storage, config.request_timeout
    );

    let account_service = AccountService::with_config(&config.storage).await?;

    let shutdown = CancellationToken::new();
    let state = Arc::new(AppState::new(account_service, shutdown.clone(), config.request_timeout));
    let router = app(state, logging::request_level(&config.log_level));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    let server = axum::serve(listener, router).with_graceful_shutdown({
        let shutdown = shutdown.clone();
        async move { shutdown.cancelled().await }
    });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => {
            // The server stopped on its own, which only happens on an I/O error
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    // Cancels in-flight storage operations and stops accepting connections
    shutdown.cancel();

    match tokio::time::timeout(config.shutdown_timeout, server).await {
        Ok(result) => {
            result??;
            info!("Server stopped gracefully");
        }
        Err(_) => {
            warn!("Graceful shutdown timed out after {:?}", config.shutdown_timeout);
        }
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Error waiting for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
