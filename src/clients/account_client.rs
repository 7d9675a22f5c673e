//! HTTP client for the account service.
//!
//! The account service owns balances. This service only reads an account's
//! balance and pushes a new one back:
//! - `GET {base}/api/accounts/{id}`
//! - `PUT {base}/api/accounts/{id}/balance` with `{"newBalance": ...}`

use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use rust_decimal::Decimal;
use url::Url;

use crate::models::account::{Account, UpdateBalanceRequest};

/// Failure talking to the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountClientError {
    /// The account service answered 404.
    #[error("account not found")]
    NotFound,

    /// Any other non-success answer.
    #[error("account service responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Connection, timeout, or response decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid account service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl AccountClientError {
    /// Status to report to our own caller.
    ///
    /// Remote statuses pass through; failures without one become 502.
    pub fn status(&self) -> StatusCode {
        match self {
            AccountClientError::NotFound => StatusCode::NOT_FOUND,
            AccountClientError::Status { status, .. } => *status,
            AccountClientError::Transport(_) | AccountClientError::InvalidUrl(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

/// Operations this service needs from the account service.
#[async_trait]
pub trait AccountClient: Send + Sync {
    /// Fetch the account, including its current balance.
    async fn get_account(&self, account_id: i64) -> Result<Account, AccountClientError>;

    /// Overwrite the account's balance and return the updated account.
    async fn update_balance(
        &self,
        account_id: i64,
        new_balance: Decimal,
    ) -> Result<Account, AccountClientError>;
}

/// `AccountClient` over HTTP/JSON using reqwest.
#[derive(Debug, Clone)]
pub struct HttpAccountClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpAccountClient {
    /// Build a client for the account service at `base_url`.
    ///
    /// `timeout` bounds every request, connection setup included.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AccountClientError> {
        let mut base_url = Url::parse(base_url)?;

        // Without a trailing slash, Url::join would drop the last path segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    fn account_url(&self, account_id: i64, suffix: &str) -> Result<Url, AccountClientError> {
        Ok(self
            .base_url
            .join(&format!("api/accounts/{}{}", account_id, suffix))?)
    }
}

#[async_trait]
impl AccountClient for HttpAccountClient {
    async fn get_account(&self, account_id: i64) -> Result<Account, AccountClientError> {
        let url = self.account_url(account_id, "")?;
        tracing::debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        read_account(response).await
    }

    async fn update_balance(
        &self,
        account_id: i64,
        new_balance: Decimal,
    ) -> Result<Account, AccountClientError> {
        let url = self.account_url(account_id, "/balance")?;
        tracing::debug!("PUT {} newBalance={}", url, new_balance);

        let response = self
            .http
            .put(url)
            .json(&UpdateBalanceRequest { new_balance })
            .send()
            .await?;
        read_account(response).await
    }
}

/// Map the account service response to an account or a typed error.
async fn read_account(response: reqwest::Response) -> Result<Account, AccountClientError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(AccountClientError::NotFound);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AccountClientError::Status { status, body });
    }

    Ok(response.json::<Account>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Path, State},
        routing::{get, put},
    };
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    type Received = Arc<Mutex<Vec<(i64, Value)>>>;

    async fn get_account(Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
        match id {
            1 => Ok(Json(json!({
                "id": 1,
                "customerName": "Test Customer",
                "balance": 1000.50
            }))),
            500 => Err(StatusCode::INTERNAL_SERVER_ERROR),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn put_balance(
        State(received): State<Received>,
        Path(id): Path<i64>,
        Json(body): Json<Value>,
    ) -> Result<Json<Value>, StatusCode> {
        received.lock().unwrap().push((id, body.clone()));
        if id != 1 {
            return Err(StatusCode::NOT_FOUND);
        }
        Ok(Json(json!({
            "id": id,
            "customerName": "Test Customer",
            "balance": body["newBalance"]
        })))
    }

    /// Start a stand-in account service mounted under `prefix`.
    async fn spawn_account_service(prefix: &str) -> (String, Received) {
        let received: Received = Arc::default();
        let routes = Router::new()
            .route("/api/accounts/{id}", get(get_account))
            .route("/api/accounts/{id}/balance", put(put_balance))
            .with_state(received.clone());
        let app = if prefix.is_empty() {
            routes
        } else {
            Router::new().nest(prefix, routes)
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}{}", addr, prefix), received)
    }

    fn client(base: &str) -> HttpAccountClient {
        HttpAccountClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_account_reads_balance() {
        let (base, _) = spawn_account_service("").await;

        let account = client(&base).get_account(1).await.unwrap();

        assert_eq!(account.id, 1);
        assert_eq!(account.customer_name.as_deref(), Some("Test Customer"));
        assert_eq!(account.balance, dec!(1000.50));
    }

    #[tokio::test]
    async fn test_get_account_maps_404_to_not_found() {
        let (base, _) = spawn_account_service("").await;

        let result = client(&base).get_account(999).await;

        assert!(matches!(result, Err(AccountClientError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_account_keeps_other_statuses() {
        let (base, _) = spawn_account_service("").await;

        let err = client(&base).get_account(500).await.unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, AccountClientError::Status { .. }));
    }

    #[tokio::test]
    async fn test_update_balance_sends_new_balance() {
        let (base, received) = spawn_account_service("").await;

        let account = client(&base).update_balance(1, dec!(1100.50)).await.unwrap();

        assert_eq!(account.balance, dec!(1100.50));
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].0, 1);
        assert_eq!(received[0].1["newBalance"], json!("1100.50"));
    }

    #[tokio::test]
    async fn test_update_balance_maps_404_to_not_found() {
        let (base, _) = spawn_account_service("").await;

        let result = client(&base).update_balance(2, dec!(10)).await;

        assert!(matches!(result, Err(AccountClientError::NotFound)));
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_kept() {
        let (base, _) = spawn_account_service("/accounts-svc").await;

        let account = client(&base).get_account(1).await.unwrap();

        assert_eq!(account.id, 1);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_bad_gateway() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .get_account(1)
            .await
            .unwrap_err();

        assert!(matches!(err, AccountClientError::Transport(_)));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpAccountClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(AccountClientError::InvalidUrl(_))));
    }
}
