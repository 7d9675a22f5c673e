//! Account service wire types.
//!
//! Accounts live in a separate service; these types only describe what
//! travels over HTTP between the two services.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account as returned by the account service.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "customerName": "Test Customer",
///   "balance": 1000.00
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,

    #[serde(default)]
    pub customer_name: Option<String>,

    /// Authoritative balance, never negative. Read from the number's text so
    /// no digits are lost.
    #[serde(deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize")]
    pub balance: Decimal,
}

/// Body of `PUT /api/accounts/{id}/balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBalanceRequest {
    pub new_balance: Decimal,
}
