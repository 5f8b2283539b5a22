//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged between the console
//! client and the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`chat`] - Completion endpoint request/response bodies
//! - [`wallet`] - Wallet snapshot and derived balance totals
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case, except where a wire contract demands otherwise
//! - **Enums**: Serialize to lowercase strings using `#[serde(rename_all = "lowercase")]`
//! - **All types**: Implement both `Serialize` and `Deserialize`
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/chat
//! Content-Type: application/json
//!
//! {
//!   "messages": [
//!     { "role": "user", "content": "what is a memecoin?" }
//!   ]
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "response": "Ahh, a fellow miner seeking knowledge..." }
//! ```

pub mod chat;
pub mod wallet;

pub use chat::*;
pub use wallet::*;
