//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! ## Modules
//!
//! - **[`service`]**: Service traits for dependency injection (`ChatApi`, `WalletApi`,
//!   `WalletProvider`, `ConnectApproval`)
//!
//! ## Error Handling
//!
//! The console client shares the backend's taxonomy, [`lib_core::AppError`], so a
//! server `{error, details}` body and a local failure are reported the same way.
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! use terminal::core::service::ChatApi;
//!
//! // In production: use real implementations
//! let api: Arc<dyn ChatApi> = Arc::new(terminal::services::api::ApiClient::from_config(&config)?);
//!
//! // In tests: use mock implementations
//! let api: Arc<dyn ChatApi> = Arc::new(MockChatApi::default());
//! ```

pub mod service;

// Re-export commonly used types for convenience
pub use lib_core::{AppError, Result};
pub use service::{AutoApprove, ChatApi, ConnectApproval, WalletApi, WalletEvent, WalletProvider};
