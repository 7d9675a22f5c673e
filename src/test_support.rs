//! In-crate test doubles for the service's collaborators.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::StatusCode;
use rust_decimal::Decimal;

use crate::{
    clients::account_client::{AccountClient, AccountClientError},
    error::AppError,
    models::{
        account::Account,
        transaction::{NewTransaction, Transaction},
    },
    store::TransactionStore,
};

/// Account service stand-in keeping balances in a map.
#[derive(Default)]
pub struct MockAccountClient {
    balances: Mutex<HashMap<i64, Decimal>>,
    get_calls: AtomicUsize,
    updates: Mutex<Vec<(i64, Decimal)>>,
    vanish_before_update: bool,
    fail_with: Option<StatusCode>,
}

impl MockAccountClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, account_id: i64, balance: Decimal) -> Self {
        self.balances.lock().unwrap().insert(account_id, balance);
        self
    }

    /// Accounts disappear right after they are read.
    pub fn vanishing_before_update(mut self) -> Self {
        self.vanish_before_update = true;
        self
    }

    /// Every call fails with this status.
    pub fn failing_with(mut self, status: StatusCode) -> Self {
        self.fail_with = Some(status);
        self
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Balance updates received, in order.
    pub fn updates(&self) -> Vec<(i64, Decimal)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn balance(&self, account_id: i64) -> Option<Decimal> {
        self.balances.lock().unwrap().get(&account_id).copied()
    }

    fn failure(&self) -> Option<AccountClientError> {
        self.fail_with.map(|status| AccountClientError::Status {
            status,
            body: "account service unavailable".to_string(),
        })
    }
}

#[async_trait]
impl AccountClient for MockAccountClient {
    async fn get_account(&self, account_id: i64) -> Result<Account, AccountClientError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure() {
            return Err(err);
        }

        let mut balances = self.balances.lock().unwrap();
        let balance = balances
            .get(&account_id)
            .copied()
            .ok_or(AccountClientError::NotFound)?;
        if self.vanish_before_update {
            balances.remove(&account_id);
        }

        Ok(Account {
            id: account_id,
            customer_name: Some("Test Customer".to_string()),
            balance,
        })
    }

    async fn update_balance(
        &self,
        account_id: i64,
        new_balance: Decimal,
    ) -> Result<Account, AccountClientError> {
        if let Some(err) = self.failure() {
            return Err(err);
        }

        let mut balances = self.balances.lock().unwrap();
        let balance = balances
            .get_mut(&account_id)
            .ok_or(AccountClientError::NotFound)?;
        *balance = new_balance;
        self.updates.lock().unwrap().push((account_id, new_balance));

        Ok(Account {
            id: account_id,
            customer_name: Some("Test Customer".to_string()),
            balance: new_balance,
        })
    }
}

/// Store whose every operation fails.
pub struct FailingTransactionStore;

#[async_trait]
impl TransactionStore for FailingTransactionStore {
    async fn insert(&self, _transaction: NewTransaction) -> Result<Transaction, AppError> {
        Err(AppError::Internal("store unavailable".to_string()))
    }

    async fn find_recent(&self, _account_id: i64, _limit: i64) -> Result<Vec<Transaction>, AppError> {
        Err(AppError::Internal("store unavailable".to_string()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Internal("store unavailable".to_string()))
    }

    fn kind(&self) -> &'static str {
        "failing"
    }
}
