//! # Backend API Client Module
//!
//! HTTP client for communicating with the Axum backend API server.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports and documentation
//! ├── client.rs   - ApiClient struct and error-body handling
//! ├── chat.rs     - Completion endpoint (POST /api/chat)
//! └── wallet.rs   - Wallet snapshot endpoint (GET /api/wallet/snapshot)
//! ```

pub mod chat;
pub mod client;
pub mod wallet;

pub use client::ApiClient;
