//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: stored record of a deposit or withdrawal
//! - `NewTransaction`: what the orchestrator hands to the store
//! - `TransactionRequest`: request body for deposit/withdraw
//! - `TransactionResponse`: response body returned to clients

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::error::AppError;

/// Kind of balance change a transaction represents.
///
/// Stored as the Postgres enum `transaction_type` and serialized as
/// `"DEPOSIT"` / `"WITHDRAWAL"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

/// Represents a transaction record from the store.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction:
/// - Gets its `id` and `timestamp` from the store at insert time
/// - Records one account and one positive amount
/// - Snapshots the balance the account service was told to hold afterwards
///
/// Records are append-only: nothing in this service updates or deletes them.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Store-assigned identifier
    pub id: i64,

    /// Account the balance change applies to (owned by the account service)
    pub account_id: i64,

    /// Amount moved, always positive
    pub amount: Decimal,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// When the record was created
    #[sqlx(rename = "created_at")]
    pub timestamp: DateTime<Utc>,

    /// Account balance right after this transaction was applied
    pub balance_after_transaction: Decimal,
}

/// A transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: i64,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub balance_after_transaction: Decimal,
}

impl NewTransaction {
    /// Attach the store-assigned identity to produce the stored record.
    pub fn into_transaction(self, id: i64, timestamp: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            account_id: self.account_id,
            amount: self.amount,
            transaction_type: self.transaction_type,
            timestamp,
            balance_after_transaction: self.balance_after_transaction,
        }
    }
}

/// Request body for deposit and withdraw endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "amount": "100.00"
/// }
/// ```
///
/// Plain JSON numbers (`100.00`) are accepted too, keeping their scale.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    /// Amount to deposit or withdraw
    #[serde(default, deserialize_with = "exact_amount")]
    pub amount: Option<Decimal>,
}

/// Optional decimal read from the JSON text rather than through `f64`.
fn exact_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Exact(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

    Ok(Option::<Exact>::deserialize(deserializer)?.map(|Exact(amount)| amount))
}

impl TransactionRequest {
    /// Required-field check done at the request boundary.
    ///
    /// Sign checks belong to the service, so a negative amount passes here.
    pub fn amount(&self) -> Result<Decimal, AppError> {
        self.amount.ok_or_else(|| AppError::Validation {
            message: "Validation failed".to_string(),
            field_errors: BTreeMap::from([("amount".to_string(), "Amount is required".to_string())]),
        })
    }
}

/// Response returned for transaction operations.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 42,
///   "amount": "100.00",
///   "type": "DEPOSIT",
///   "timestamp": "2025-12-21T16:00:00Z",
///   "balanceAfterTransaction": "1100.00"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Utc>,
    pub balance_after_transaction: Decimal,
}

/// Convert a stored Transaction to the API TransactionResponse.
///
/// The account id is dropped; callers already addressed the account by path.
impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            timestamp: transaction.timestamp,
            balance_after_transaction: transaction.balance_after_transaction,
        }
    }
}
