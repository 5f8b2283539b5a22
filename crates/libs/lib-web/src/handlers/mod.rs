//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain. Handlers delegate business logic
//! to services in the [`crate::services`] module.
//!
//! ## Handler Modules
//!
//! - **[`chat`]**: completion proxy
//!   - `POST /api/chat` - Forward a message log to the LLM provider
//!
//! - **[`wallet`]**: wallet query endpoints
//!   - `GET /api/wallet/snapshot` - Native balance, token list and totals
//!
//! ## Handler Architecture
//!
//! All handlers follow Axum's extractor pattern and return
//! `Result<Json<T>, AppError>`; `AppError` renders the
//! `{ "error": ..., "details": ... }` body.
//!
//! ```rust,ignore
//! async fn handler(
//!     State(service): State<Arc<ChatService>>,  // Shared state
//!     payload: Result<Json<ChatRequest>, JsonRejection>,
//! ) -> Result<Json<ChatResponse>, AppError> {
//!     // Handler logic...
//! }
//! ```

pub mod chat;
pub mod wallet;
