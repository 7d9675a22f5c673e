//! Application configuration management.
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file) and deserialized into a type-safe struct with `envy`.

use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (optional): PostgreSQL connection string. When unset the
///   service keeps transactions in memory.
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `ACCOUNT_SERVICE_URL` (optional): base URL of the account service,
///   defaults to `http://localhost:8080`
/// - `ACCOUNT_SERVICE_TIMEOUT_SECS` (optional): per-request timeout for the
///   account service, defaults to 5
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_account_service_url")]
    pub account_service_url: String,

    #[serde(default = "default_account_service_timeout_secs")]
    pub account_service_timeout_secs: u64,

    #[serde(default = "default_port")]
    pub server_port: u16,
}

fn default_max_connections() -> u32 {
    5
}

fn default_account_service_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_account_service_timeout_secs() -> u64 {
    5
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into the expected type (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Does nothing if there is no .env file
        dotenvy::dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Build configuration from an explicit set of `(NAME, value)` pairs.
    ///
    /// Field names map to upper-case variables: `server_port` -> `SERVER_PORT`.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
    }

    pub fn account_service_timeout(&self) -> Duration {
        Duration::from_secs(self.account_service_timeout_secs)
    }
}
