//! HTTP routing.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Build the application router.
///
/// # Routes
///
/// - `POST /api/transactions/accounts/{id}/deposit`
/// - `POST /api/transactions/accounts/{id}/withdraw`
/// - `GET /api/transactions/accounts/{id}` - ten most recent, newest first
/// - `GET /health`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/transactions/accounts/{id}/deposit",
            post(handlers::transactions::deposit),
        )
        .route(
            "/api/transactions/accounts/{id}/withdraw",
            post(handlers::transactions::withdraw),
        )
        .route(
            "/api/transactions/accounts/{id}",
            get(handlers::transactions::recent_transactions),
        )
        // Request/response spans for every route
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
