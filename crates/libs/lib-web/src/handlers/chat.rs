//! # Chat Handler
//!
//! `POST /api/chat` - completion proxy.
//!
//! ## Request
//!
//! ```json
//! { "messages": [ { "role": "user", "content": "gm" } ] }
//! ```
//!
//! ## Responses
//!
//! - `200 { "response": "..." }`
//! - `400 { "error": "...", "details": "..." }` - body is not a message log
//! - `500 { "error": "...", "details": "..." }` - provider failure or empty reply

use crate::services::ChatService;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use lib_core::AppError;
use shared::dto::chat::{ChatRequest, ChatResponse};
use std::sync::Arc;
use tracing::{info, instrument};

#[instrument(skip_all)]
pub async fn chat(
    State(service): State<Arc<ChatService>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    info!("[CHAT] Completion request with {} messages", request.messages.len());

    let response = service.respond(request.messages).await?;

    Ok(Json(ChatResponse { response }))
}
