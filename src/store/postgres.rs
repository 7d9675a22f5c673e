use async_trait::async_trait;

use super::TransactionStore;
use crate::{
    db::DbPool,
    error::AppError,
    models::transaction::{NewTransaction, Transaction},
};

/// Transaction store backed by the `transactions` table.
#[derive(Debug, Clone)]
pub struct PgTransactionStore {
    pool: DbPool,
}

impl PgTransactionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn insert(&self, transaction: NewTransaction) -> Result<Transaction, AppError> {
        // id and created_at come from column defaults
        let stored = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (
                account_id,
                amount,
                transaction_type,
                balance_after_transaction
            )
            VALUES ($1, $2, $3, $4)
            RETURNING id, account_id, amount, transaction_type, created_at, balance_after_transaction
            "#,
        )
        .bind(transaction.account_id)
        .bind(transaction.amount)
        .bind(transaction.transaction_type)
        .bind(transaction.balance_after_transaction)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn find_recent(&self, account_id: i64, limit: i64) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, account_id, amount, transaction_type, created_at, balance_after_transaction
            FROM transactions
            WHERE account_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "postgres"
    }
}
