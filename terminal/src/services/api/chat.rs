//! # Chat API
//!
//! Completion endpoint: `POST /api/chat`.

use super::client::{error_from_response, network_error, ApiClient};
use lib_core::{AppError, Result};
use shared::dto::chat::{ChatMessage, ChatRequest, ChatResponse};

pub const NO_RESPONSE: &str = "No response received from API";

/// Send a message log and return the assistant reply text.
///
/// The backend prepends the persona; callers send only the conversation.
pub async fn send_chat(api: &ApiClient, messages: Vec<ChatMessage>) -> Result<String> {
    let url = api.url("/api/chat");
    tracing::debug!("[CHAT] POST {} ({} messages)", url, messages.len());

    let response = api
        .client
        .post(&url)
        .json(&ChatRequest { messages })
        .send()
        .await
        .map_err(network_error)?;

    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let body: ChatResponse = response
        .json()
        .await
        .map_err(|e| AppError::Parse(format!("Failed to parse response: {}", e)))?;

    if body.response.trim().is_empty() {
        return Err(AppError::Parse(NO_RESPONSE.to_string()));
    }
    Ok(body.response)
}
