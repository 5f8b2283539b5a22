//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across the server, the Solana data clients and the console client. It follows the
//! `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Wallet** - provider lifecycle
//!    - [`WalletUnavailable`](AppError::WalletUnavailable): no provider / keypair found
//!    - [`UserRejected`](AppError::UserRejected): the connect prompt was declined
//!
//! 2. **Remote calls** - balance RPC, indexing API, completion endpoint
//!    - [`Network`](AppError::Network) → 502 Bad Gateway
//!    - [`Parse`](AppError::Parse) → 502 Bad Gateway
//!    - [`Upstream`](AppError::Upstream) → 500 (the LLM provider failed)
//!
//! 3. **Conversation** - client-side store and dispatcher
//!    - [`UnknownSession`](AppError::UnknownSession) → 404 Not Found
//!    - [`DispatchInProgress`](AppError::DispatchInProgress) → 409 Conflict
//!
//! 4. **Ambient**
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`Config`](AppError::Config) / [`Internal`](AppError::Internal) → 500
//!
//! ## Propagation
//!
//! No error here is fatal. The chat path turns remote failures into an
//! assistant-role message; the wallet path logs and swallows them. Nothing is
//! retried automatically.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_address(addr: &str) -> Result<String> {
//!     if addr.len() < 32 {
//!         return Err(AppError::InvalidInput(
//!             format!("Invalid address: {}", addr)
//!         ));
//!     }
//!     Ok(addr.to_string())
//! }
//! ```

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use shared::dto::chat::ChatErrorResponse;
use thiserror::Error;

/// Fixed `error` field of every error body.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request";

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
///
/// Each variant includes a descriptive `String` for context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// No wallet provider detected (keypair file missing or unreadable).
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    /// The wallet connect prompt was declined.
    #[error("Connection rejected: {0}")]
    UserRejected(String),

    /// Transport failure or non-2xx status from a remote service.
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed JSON or a missing expected field.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operation on a session id the store does not know.
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    /// A dispatch is already in flight for the session.
    #[error("Dispatch in progress for session {0}")]
    DispatchInProgress(String),

    /// The LLM provider failed to produce a completion.
    #[error("Completion provider error: {0}")]
    Upstream(String),

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input validation error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownSession(_) => StatusCode::NOT_FOUND,
            AppError::DispatchInProgress(_) => StatusCode::CONFLICT,
            AppError::UserRejected(_) => StatusCode::FORBIDDEN,
            AppError::WalletUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Network(_) | AppError::Parse(_) => StatusCode::BAD_GATEWAY,
            AppError::Upstream(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The reason, without the variant prefix.
    ///
    /// Configuration and internal errors are replaced by a generic string so that
    /// implementation details stay in the server log.
    pub fn details(&self) -> String {
        match self {
            AppError::WalletUnavailable(msg)
            | AppError::UserRejected(msg)
            | AppError::Network(msg)
            | AppError::Parse(msg)
            | AppError::UnknownSession(msg)
            | AppError::DispatchInProgress(msg)
            | AppError::Upstream(msg)
            | AppError::InvalidInput(msg) => msg.clone(),
            AppError::Config(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Short variant name, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::WalletUnavailable(_) => "WalletUnavailable",
            AppError::UserRejected(_) => "UserRejected",
            AppError::Network(_) => "Network",
            AppError::Parse(_) => "Parse",
            AppError::UnknownSession(_) => "UnknownSession",
            AppError::DispatchInProgress(_) => "DispatchInProgress",
            AppError::Upstream(_) => "Upstream",
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
///
/// Every error renders as `{ "error": ..., "details": ... }`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "Server error: {}", self);
        } else {
            tracing::debug!(code = self.code(), "Client error: {}", self);
        }

        let body = Json(ChatErrorResponse {
            error: GENERIC_ERROR_MESSAGE.to_string(),
            details: self.details(),
        });

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(format!("JSON error: {}", err))
    }
}

/// Convert `reqwest::Error` to `AppError`.
///
/// Body decoding failures are parse errors; everything else (connect, timeout,
/// status) is a network error.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Parse(err.to_string())
        } else if err.is_timeout() {
            AppError::Network(format!("Request timed out: {}", err))
        } else {
            AppError::Network(err.to_string())
        }
    }
}
