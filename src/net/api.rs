//! Blog API client.
//!
//! DESIGN
//! ======
//! `BlogApi` is the seam between the guard/store logic and the network.
//! `HttpApi` is the real `reqwest` implementation; tests substitute
//! hand-written mocks that count calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure (transport, non-2xx, malformed body) surfaces as an
//! [`ApiError`]. Callers decide whether that means a redirect or a log line;
//! nothing here retries.

use async_trait::async_trait;

use super::types::{UserRecord, VerifyTokenRequest};
use crate::config::ClientConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("API request failed: {0}")]
    Request(String),

    /// The server answered with a non-2xx status.
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("API response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Remote operations the client depends on.
#[async_trait]
pub trait BlogApi: Send + Sync {
    /// Ask the server whether `token` is still valid.
    ///
    /// # Errors
    ///
    /// Any error means the token must be treated as rejected.
    async fn verify_token(&self, token: &str) -> Result<(), ApiError>;

    /// Fetch the full user list.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx, or a body that
    /// is not a JSON array.
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpApi {
    http: reqwest::Client,
    verify_url: String,
    users_url: String,
}

impl HttpApi {
    /// Build a client for the endpoints described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the TLS backend fails to
    /// initialise.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, verify_url: config.verify_token_url(), users_url: config.users_url() })
    }
}

#[async_trait]
impl BlogApi for HttpApi {
    async fn verify_token(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(&self.verify_url)
            .json(&VerifyTokenRequest { token })
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        // Success body is unused, so it is never read.
        if response.status().is_success() {
            return Ok(());
        }
        Err(status_error(response).await)
    }

    async fn fetch_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        let response = self
            .http
            .get(&self.users_url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let text = check_status(response).await?;
        parse_users(&text)
    }
}

async fn check_status(response: reqwest::Response) -> Result<String, ApiError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    response.text().await.map_err(|e| ApiError::Request(e.to_string()))
}

async fn status_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::Status { status, body }
}

fn parse_users(text: &str) -> Result<Vec<UserRecord>, ApiError> {
    serde_json::from_str::<Vec<UserRecord>>(text).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
