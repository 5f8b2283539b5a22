//! # Chat Service
//!
//! Prepends the configured persona to the caller's message log and forwards
//! the result to the completion provider. The persona is never taken from the
//! client.

use super::completion::CompletionProvider;
use lib_core::Result;
use shared::dto::chat::ChatMessage;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct ChatService {
    provider: Arc<dyn CompletionProvider>,
    persona: String,
}

impl ChatService {
    pub fn new(provider: Arc<dyn CompletionProvider>, persona: impl Into<String>) -> Self {
        Self {
            provider,
            persona: persona.into(),
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// The exact log sent upstream: persona first, then `messages` unchanged.
    pub fn compose(&self, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
        let mut log = Vec::with_capacity(messages.len() + 1);
        log.push(ChatMessage::system(self.persona.as_str()));
        log.extend(messages);
        log
    }

    #[instrument(skip_all, fields(provider = self.provider.name(), count = messages.len()))]
    pub async fn respond(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let log = self.compose(messages);
        let reply = self.provider.complete(&log).await?;

        info!("[CHAT] Completion ok ({} chars)", reply.len());
        Ok(reply)
    }
}
