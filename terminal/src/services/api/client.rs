//! # API Client
//!
//! Main HTTP client for backend API communication.

use crate::config::TerminalConfig;
use crate::core::service::{ChatApi, WalletApi};
use lib_core::{AppError, Result};
use reqwest::{Client, Response};
use shared::dto::chat::{ChatErrorResponse, ChatMessage};
use shared::dto::wallet::WalletSnapshotResponse;
use std::time::Duration;

/// HTTP client for communicating with the backend API server.
///
/// Holds one connection pool for every request.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &TerminalConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone(), Duration::from_secs(config.http_timeout_secs))
    }

    /// Get the base URL for API requests.
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

/// Turn a non-2xx response into a `Network` error carrying the server's reason.
pub(crate) async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let reason = serde_json::from_str::<ChatErrorResponse>(&body)
        .map(|e| e.details)
        .ok()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    AppError::Network(format!("HTTP {}: {}", status.as_u16(), reason))
}

pub(crate) fn network_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Network("Request timed out".to_string())
    } else {
        AppError::Network(format!("Network error: {}", e))
    }
}

#[async_trait::async_trait]
impl ChatApi for ApiClient {
    async fn send_chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        crate::services::api::chat::send_chat(self, messages).await
    }
}

#[async_trait::async_trait]
impl WalletApi for ApiClient {
    async fn wallet_snapshot(&self, address: &str) -> Result<WalletSnapshotResponse> {
        crate::services::api::wallet::get_wallet_snapshot(self, address).await
    }
}
