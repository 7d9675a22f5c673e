//! Transaction service - Core business logic for deposits and withdrawals.
//!
//! This service handles:
//! - Amount validation
//! - Balance lookup and update through the account service
//! - Recording the resulting transaction
//!
//! # Consistency
//!
//! The account service and the transaction store are updated one after the
//! other with no shared transaction. If the store write fails after the
//! balance update succeeded, the balance update stays in place. Concurrent
//! withdrawals against one account are not serialized either.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    clients::account_client::{AccountClient, AccountClientError},
    error::AppError,
    models::{
        account::Account,
        transaction::{NewTransaction, Transaction, TransactionType},
    },
    store::TransactionStore,
};

/// How many transactions `recent_transactions` returns at most.
pub const RECENT_TRANSACTIONS_LIMIT: i64 = 10;

/// Orchestrates deposits and withdrawals against the account service.
#[derive(Clone)]
pub struct TransactionService {
    accounts: Arc<dyn AccountClient>,
    store: Arc<dyn TransactionStore>,
}

impl TransactionService {
    pub fn new(accounts: Arc<dyn AccountClient>, store: Arc<dyn TransactionStore>) -> Self {
        Self { accounts, store }
    }

    /// Deposit `amount` into the account.
    ///
    /// # Process
    ///
    /// 1. Reject non-positive amounts
    /// 2. Fetch the current balance
    /// 3. Push `balance + amount` to the account service
    /// 4. Record the transaction
    ///
    /// # Errors
    ///
    /// - `InvalidAmount`: amount is zero or negative
    /// - `AccountNotFound`: the account service does not know the account
    /// - `AccountService`: any other account service failure
    /// - `Database`: the transaction could not be stored
    pub async fn deposit(&self, account_id: i64, amount: Decimal) -> Result<Transaction, AppError> {
        ensure_positive(amount, "Deposit")?;

        let account = self.fetch_account(account_id).await?;
        let new_balance = account.balance.checked_add(amount).ok_or_else(|| {
            AppError::InvalidAmount("Deposit amount exceeds the supported balance range".to_string())
        })?;

        self.record(account_id, amount, TransactionType::Deposit, new_balance)
            .await
    }

    /// Withdraw `amount` from the account.
    ///
    /// Same flow as [`deposit`](Self::deposit), with a balance check before
    /// anything is written.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount`: amount is zero or negative
    /// - `AccountNotFound`: the account service does not know the account
    /// - `InsufficientBalance`: amount is larger than the current balance
    /// - `AccountService`: any other account service failure
    /// - `Database`: the transaction could not be stored
    pub async fn withdraw(&self, account_id: i64, amount: Decimal) -> Result<Transaction, AppError> {
        ensure_positive(amount, "Withdrawal")?;

        let account = self.fetch_account(account_id).await?;
        if account.balance < amount {
            tracing::warn!(
                "Rejected withdrawal of {} from account {}: balance is {}",
                amount,
                account_id,
                account.balance
            );
            return Err(AppError::InsufficientBalance {
                balance: account.balance,
                amount,
            });
        }
        let new_balance = account.balance - amount;

        self.record(account_id, amount, TransactionType::Withdrawal, new_balance)
            .await
    }

    /// Up to ten most recent transactions for the account, newest first.
    ///
    /// Unknown accounts simply have no transactions.
    pub async fn recent_transactions(&self, account_id: i64) -> Result<Vec<Transaction>, AppError> {
        self.store
            .find_recent(account_id, RECENT_TRANSACTIONS_LIMIT)
            .await
    }

    async fn fetch_account(&self, account_id: i64) -> Result<Account, AppError> {
        let account = self
            .accounts
            .get_account(account_id)
            .await
            .map_err(|err| not_found_as_account(err, account_id))?;

        tracing::debug!(
            "Account {} ({}) has balance {}",
            account.id,
            account.customer_name.as_deref().unwrap_or("unnamed"),
            account.balance
        );

        Ok(account)
    }

    /// Push the new balance, then store the transaction.
    async fn record(
        &self,
        account_id: i64,
        amount: Decimal,
        transaction_type: TransactionType,
        new_balance: Decimal,
    ) -> Result<Transaction, AppError> {
        self.accounts
            .update_balance(account_id, new_balance)
            .await
            .map_err(|err| not_found_as_account(err, account_id))?;

        let transaction = self
            .store
            .insert(NewTransaction {
                account_id,
                amount,
                transaction_type,
                balance_after_transaction: new_balance,
            })
            .await
            .inspect_err(|err| {
                tracing::error!(
                    "Balance of account {} already set to {} but the {:?} of {} was not stored: {}",
                    account_id,
                    new_balance,
                    transaction_type,
                    amount,
                    err
                );
            })?;

        tracing::info!(
            "Recorded {:?} {} of {} on account {}, balance now {}",
            transaction.transaction_type,
            transaction.id,
            transaction.amount,
            account_id,
            transaction.balance_after_transaction
        );

        Ok(transaction)
    }
}

fn ensure_positive(amount: Decimal, operation: &str) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidAmount(format!(
            "{} amount must be positive",
            operation
        )));
    }
    Ok(())
}

fn not_found_as_account(err: AccountClientError, account_id: i64) -> AppError {
    match err {
        AccountClientError::NotFound => AppError::AccountNotFound(account_id),
        other => AppError::AccountService(other),
    }
}
