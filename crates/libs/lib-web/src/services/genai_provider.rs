//! # rust-genai Provider
//!
//! [`CompletionProvider`] backed by rust-genai, selected with `AI_PROVIDER=genai`.
//! The model name picks the backend (OpenAI, Anthropic, Gemini, DeepSeek, ...).

use super::completion::{CompletionProvider, NO_RESPONSE};
use async_trait::async_trait;
use genai::chat::{ChatMessage as GenAiMessage, ChatOptions, ChatRequest};
use genai::resolver::{AuthData, AuthResolver};
use genai::Client;
use lib_core::{AiConfig, AppError, Result};
use shared::dto::chat::{ChatMessage, ChatRole};
use std::time::Duration;

pub struct GenAiProvider {
    client: Client,
    model: String,
    options: ChatOptions,
    timeout: Duration,
}

impl GenAiProvider {
    pub fn new(config: &AiConfig, timeout: Duration) -> Self {
        let api_key = config.api_key.clone();
        let auth_resolver = AuthResolver::from_resolver_fn(
            move |_model_iden| -> std::result::Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_single(api_key.clone())))
            },
        );

        let client = Client::builder().with_auth_resolver(auth_resolver).build();

        let options = ChatOptions::default()
            .with_temperature(config.temperature as f64)
            .with_max_tokens(config.max_tokens);

        Self {
            client,
            model: config.model.clone(),
            options,
            timeout,
        }
    }
}

#[async_trait]
impl CompletionProvider for GenAiProvider {
    fn name(&self) -> &str {
        "genai"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let chat_req = messages.iter().fold(ChatRequest::default(), |req, msg| {
            let content = msg.content.clone();
            req.append_message(match msg.role {
                ChatRole::System => GenAiMessage::system(content),
                ChatRole::User => GenAiMessage::user(content),
                ChatRole::Assistant => GenAiMessage::assistant(content),
            })
        });

        tracing::debug!("[CHAT] Calling genai with model: {}", self.model);

        let chat_res = tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, chat_req, Some(&self.options)),
        )
        .await
        .map_err(|_| AppError::Upstream("Completion request timed out".to_string()))?
        .map_err(|e| AppError::Upstream(format!("AI API error: {}", e)))?;

        let text = chat_res
            .first_text()
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::Upstream(NO_RESPONSE.to_string()));
        }

        Ok(text)
    }
}
