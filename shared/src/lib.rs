//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the console client and the backend API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::chat`]**: Completion endpoint bodies
//!   - **[`dto::wallet`]**: Wallet snapshot and derived totals
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!   - **[`utils::format_usd`]** / **[`utils::format_amount`]**: Balance display strings
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using the default `serde` behavior:
//! - Field names use **snake_case** in Rust, which maps to **snake_case** in JSON by default
//! - Optional fields are omitted from JSON when `None` (using `#[serde(skip_serializing_if = "Option::is_none")]`)
//! - All structs implement both `Serialize` and `Deserialize` for bidirectional communication
//!
//! ## Usage in Backend
//!
//! ```rust,ignore
//! use shared::dto::chat::{ChatRequest, ChatResponse};
//! use axum::Json;
//!
//! async fn chat(Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
//!     // Request is automatically deserialized from JSON
//!     // Response is automatically serialized to JSON
//!     # todo!()
//! }
//! ```
//!
//! ## Usage in the Console Client
//!
//! ```rust,ignore
//! use shared::dto::chat::{ChatMessage, ChatRequest, ChatResponse};
//!
//! # async fn example() -> Result<(), reqwest::Error> {
//! let request = ChatRequest {
//!     messages: vec![ChatMessage::user("gm")],
//! };
//!
//! let response: ChatResponse = reqwest::Client::new()
//!     .post("http://localhost:3001/api/chat")
//!     .json(&request)
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
