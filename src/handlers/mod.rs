//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Validates the request path and body
//! 2. Calls the transaction service
//! 3. Returns a JSON response or a structured error

/// Service health endpoint
pub mod health;
/// Deposit, withdraw and history endpoints
pub mod transactions;
