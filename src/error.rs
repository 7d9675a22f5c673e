//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;

use crate::clients::account_client::AccountClientError;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and machine-readable code.
///
/// # Error Categories
///
/// - **Business Rule Errors**: non-positive amounts, insufficient balance
/// - **Resource Errors**: the account service does not know the account
/// - **Collaborator Errors**: any other account service failure
/// - **Validation Errors**: malformed request path or body
/// - **Storage Errors**: any sqlx::Error from the transaction store
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Amount is zero, negative, or would overflow the balance.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidAmount(String),

    /// The account service has no account with this id.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Account not found with id: {0}")]
    AccountNotFound(i64),

    /// Withdrawal exceeds the balance observed just before it.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error(
        "Insufficient balance for withdrawal. Current balance: {balance}, Withdrawal amount: {amount}"
    )]
    InsufficientBalance { balance: Decimal, amount: Decimal },

    /// Account service call failed for a reason other than a missing account.
    ///
    /// Propagates the remote status; transport failures become 502.
    #[error("Account service error: {0}")]
    AccountService(#[from] AccountClientError),

    /// Request path or body could not be accepted.
    ///
    /// Returns HTTP 400 Bad Request with per-field messages when known.
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    /// Transaction store query failed.
    ///
    /// Returns HTTP 500; details are logged, not sent to the client.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "invalid_amount"),
            AppError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
            AppError::InsufficientBalance { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_balance")
            }
            AppError::AccountService(err) => (err.status(), "account_service_error"),
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            message: rejection.body_text(),
            field_errors: BTreeMap::new(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation {
            message: "Validation failed".to_string(),
            field_errors: BTreeMap::from([("id".to_string(), rejection.body_text())]),
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "insufficient_balance",
///     "message": "Insufficient balance for withdrawal. ...",
///     "status": 422,
///     "timestamp": "2025-12-21T16:00:00Z"
///   }
/// }
/// ```
///
/// Validation errors add a `fieldErrors` object mapping field name to message.
///
/// # Status Code Mapping
///
/// - `InvalidAmount` → 400 Bad Request
/// - `AccountNotFound` → 404 Not Found
/// - `InsufficientBalance` → 422 Unprocessable Entity
/// - `AccountService` → remote status, or 502 Bad Gateway when there is none
/// - `Validation` → 400 Bad Request
/// - `Database`, `Internal` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else if matches!(self, AppError::AccountService(_)) {
            tracing::warn!("Request failed: {}", self);
        }

        let message = match &self {
            AppError::Database(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
            AppError::AccountService(AccountClientError::NotFound) => {
                "Account not found".to_string()
            }
            other => other.to_string(),
        };

        let mut error = json!({
            "code": code,
            "message": message,
            "status": status.as_u16(),
            "timestamp": Utc::now(),
        });

        if let AppError::Validation { field_errors, .. } = &self {
            if !field_errors.is_empty() {
                error["fieldErrors"] = json!(field_errors);
            }
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
