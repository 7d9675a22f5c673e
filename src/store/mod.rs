//! Transaction storage.
//!
//! Append-only record storage keyed by account, with two backends:
//! - [`PgTransactionStore`]: PostgreSQL through sqlx
//! - [`InMemoryTransactionStore`]: process memory, for local runs without a database

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::transaction::{NewTransaction, Transaction},
};

mod memory;
mod postgres;

pub use memory::InMemoryTransactionStore;
pub use postgres::PgTransactionStore;

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Store a new transaction, assigning its id and timestamp.
    async fn insert(&self, transaction: NewTransaction) -> Result<Transaction, AppError>;

    /// Up to `limit` transactions for the account, newest first.
    ///
    /// Transactions sharing a timestamp come out highest id first.
    async fn find_recent(&self, account_id: i64, limit: i64) -> Result<Vec<Transaction>, AppError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// Short backend name for health reporting.
    fn kind(&self) -> &'static str;
}
