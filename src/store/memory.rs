use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::TransactionStore;
use crate::{
    error::AppError,
    models::transaction::{NewTransaction, Transaction},
};

/// Transaction store held in process memory.
///
/// Ids start at 1 and increase by one per insert. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    transactions: Vec<Transaction>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored transactions across all accounts.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.lock().await.transactions.len()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, transaction: NewTransaction) -> Result<Transaction, AppError> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;

        let stored = transaction.into_transaction(inner.last_id, Utc::now());
        inner.transactions.push(stored.clone());

        Ok(stored)
    }

    async fn find_recent(&self, account_id: i64, limit: i64) -> Result<Vec<Transaction>, AppError> {
        let limit = usize::try_from(limit)
            .map_err(|_| AppError::Internal(format!("Invalid transaction limit {}", limit)))?;
        let inner = self.inner.lock().await;

        let mut transactions: Vec<Transaction> = inner
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        transactions.truncate(limit);

        Ok(transactions)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "in-memory"
    }
}
