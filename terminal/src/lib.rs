//! # BRINE Console Client - Library Root
//!
//! A line-oriented console for chatting with BRINE, the Herobrine-themed
//! Solana assistant. This library crate contains every module used by the
//! binary (`main.rs`), public so tests and other front ends can drive them.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              terminal (this crate)                     │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - stores, dispatcher, wallet bridge        │
//! │  services   - HTTP client, keypair wallet provider     │
//! │  ui         - plain-text rendering                     │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP                         │ keypair file
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Backend API    │          │  ~/.config/solana/      │
//! │  (Axum server)  │          │  id.json                │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`App`] plus the conversation store, chat dispatcher, wallet
//!   bridge and REPL command parser
//! - **core**: service traits (`ChatApi`, `WalletApi`, `WalletProvider`,
//!   `ConnectApproval`) and the shared error type
//! - **services**: `ApiClient` (backend endpoints) and `KeypairWallet`
//! - **ui**: transcript, session list and wallet panel rendering
//! - **config**: environment-driven [`TerminalConfig`]
//! - **logger**: daily-rolling file logging
//!
//! ## Concurrency
//!
//! Stores live behind `Arc<parking_lot::RwLock<_>>`. Chat dispatches run as
//! tokio tasks so the prompt stays responsive; a per-session in-flight guard
//! rejects a second dispatch and a sequence number drops superseded replies.

pub mod app;
pub mod config;
pub mod core;
pub mod logger;
pub mod services;
pub mod ui;

pub use app::{App, Command, DispatchOutcome};
pub use config::TerminalConfig;
pub use core::{AppError, Result};
