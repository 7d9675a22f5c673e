//! Transaction Service - Main Application Entry Point
//!
//! A REST API server that records deposits and withdrawals against accounts
//! owned by a separate account service, and serves each account's last ten
//! transactions.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Account balances**: remote account service over HTTP (reqwest)
//! - **Transaction history**: PostgreSQL with sqlx, or in memory when no database is configured
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Open the transaction store (pool + migrations, or in-memory)
//! 3. Build the account service client
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod clients;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    clients::account_client::HttpAccountClient,
    services::transaction_service::TransactionService,
    state::AppState,
    store::{InMemoryTransactionStore, PgTransactionStore, TransactionStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let store = open_store(&config).await?;

    let accounts = HttpAccountClient::new(
        &config.account_service_url,
        config.account_service_timeout(),
    )?;
    tracing::info!("Account service at {}", config.account_service_url);

    let state = AppState {
        transactions: TransactionService::new(Arc::new(accounts), store.clone()),
        store,
    };
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Postgres when `DATABASE_URL` is set, otherwise an in-memory store.
async fn open_store(config: &config::Config) -> anyhow::Result<Arc<dyn TransactionStore>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, transactions are kept in memory only");
        return Ok(Arc::new(InMemoryTransactionStore::new()));
    };

    let pool = db::create_pool(database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    Ok(Arc::new(PgTransactionStore::new(pool)))
}
