//! # Services Layer
//!
//! Business logic behind the HTTP handlers.
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → LLM provider / Solana RPC / Bitquery
//! ```
//!
//! ## Module Organization
//!
//! - [`completion`] - [`CompletionProvider`] seam and the OpenAI-compatible provider
//! - [`chat`] - persona handling in front of the provider
//! - [`wallet`] - wallet snapshots through the balance aggregator
//!
//! ## Error Handling
//!
//! All services return `Result<T, AppError>`. Provider failures surface as
//! `AppError::Upstream`, chain and indexer failures as `Network`/`Parse`.

pub mod chat;
pub mod completion;
#[cfg(feature = "genai")]
pub mod genai_provider;
pub mod wallet;

// Re-export services for convenience
pub use chat::ChatService;
pub use completion::{build_provider, CompletionProvider, OpenAiProvider};
pub use wallet::WalletService;
