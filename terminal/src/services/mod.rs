//! # Services Module
//!
//! External service integrations for the BRINE console.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! ├── api/       - Backend HTTP API client (chat, wallet snapshot)
//! └── wallet.rs  - Local keypair wallet provider
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     BRINE console                       │
//! │                                                         │
//! │  ┌──────────────────┐       ┌──────────────────┐        │
//! │  │  ApiClient       │       │  KeypairWallet   │        │
//! │  │  (api/)          │       │  (wallet.rs)     │        │
//! │  └────────┬─────────┘       └────────┬─────────┘        │
//! │           │                          │                  │
//! └───────────┼──────────────────────────┼──────────────────┘
//!             │ HTTP/JSON                │ keypair file
//!             ▼                          ▼
//! ┌─────────────────────┐    ┌─────────────────────────────┐
//! │  Backend API Server │    │  ~/.config/solana/id.json   │
//! │  POST /api/chat     │    └─────────────────────────────┘
//! │  GET  /api/wallet/* │
//! └─────────────────────┘
//! ```

pub mod api;
pub mod wallet;

pub use api::ApiClient;
pub use wallet::KeypairWallet;
