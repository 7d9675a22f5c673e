//! Transaction HTTP handlers.
//!
//! This module implements the transaction endpoints:
//! - POST /api/transactions/accounts/{id}/deposit - Add money to an account
//! - POST /api/transactions/accounts/{id}/withdraw - Take money from an account
//! - GET /api/transactions/accounts/{id} - Last ten transactions of an account
//!
//! Path and body extraction failures are turned into validation errors here,
//! before the service is called.

use crate::{
    error::AppError,
    models::transaction::{TransactionRequest, TransactionResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

/// Deposit into an account.
///
/// # Request Body
///
/// ```json
/// {
///   "amount": "100.00"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: the recorded transaction
/// - **Error (400)**: malformed body or non-positive amount
/// - **Error (404)**: account unknown to the account service
///
/// ```json
/// {
///   "id": 1,
///   "amount": "100.00",
///   "type": "DEPOSIT",
///   "timestamp": "2025-12-21T16:00:00Z",
///   "balanceAfterTransaction": "1100.00"
/// }
/// ```
pub async fn deposit(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let Path(account_id) = path?;
    let Json(request) = body?;
    let amount = request.amount()?;

    let transaction = state.transactions.deposit(account_id, amount).await?;

    Ok(Json(transaction.into()))
}

/// Withdraw from an account.
///
/// Same request and response shape as [`deposit`].
///
/// # Additional Errors
///
/// - **Error (422)**: amount exceeds the current balance
pub async fn withdraw(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let Path(account_id) = path?;
    let Json(request) = body?;
    let amount = request.amount()?;

    let transaction = state.transactions.withdraw(account_id, amount).await?;

    Ok(Json(transaction.into()))
}

/// Last ten transactions for an account, newest first.
///
/// Returns an empty array when the account has none.
pub async fn recent_transactions(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let Path(account_id) = path?;

    let transactions = state.transactions.recent_transactions(account_id).await?;

    Ok(Json(transactions.into_iter().map(Into::into).collect()))
}
