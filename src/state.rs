//! Shared handler state.

use std::sync::Arc;

use crate::{services::transaction_service::TransactionService, store::TransactionStore};

/// Everything handlers need, cloned into each request by Axum.
#[derive(Clone)]
pub struct AppState {
    pub transactions: TransactionService,

    /// Same store the service writes to, kept here for health checks
    pub store: Arc<dyn TransactionStore>,
}
