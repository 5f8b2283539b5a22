//! # Completion Providers
//!
//! [`CompletionProvider`] turns an ordered message log into one reply. The
//! default implementation talks to any OpenAI-compatible
//! `POST {base_url}/chat/completions` endpoint; the `genai` feature adds a
//! rust-genai backed alternative.
//!
//! Every failure is reported as [`AppError::Upstream`] so the handler answers
//! with a 500 and the reason in `details`.

use async_trait::async_trait;
use lib_core::{AiConfig, AiProvider, AppError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::dto::chat::ChatMessage;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Message returned when the provider answers without any text.
pub const NO_RESPONSE: &str = "No response generated";

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider label for logs.
    fn name(&self) -> &str;

    /// Complete `messages`, returning the assistant text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Select the provider configured by `AI_PROVIDER`.
pub fn build_provider(config: &AiConfig, timeout: Duration) -> Result<Arc<dyn CompletionProvider>> {
    match config.provider {
        AiProvider::OpenAi => Ok(Arc::new(OpenAiProvider::new(config, timeout)?)),
        #[cfg(feature = "genai")]
        AiProvider::GenAi => Ok(Arc::new(super::genai_provider::GenAiProvider::new(config, timeout))),
        #[cfg(not(feature = "genai"))]
        AiProvider::GenAi => Err(AppError::Config(
            "AI_PROVIDER=genai requires building lib-web with the 'genai' feature".to_string(),
        )),
    }
}

// region: --- OpenAI-compatible provider

pub struct OpenAiProvider {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

impl OpenAiProvider {
    pub fn new(config: &AiConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!("[CHAT] Calling {} with model {} ({} messages)", self.endpoint, self.model, messages.len());

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Upstream("Completion request timed out".to_string())
                } else {
                    AppError::Upstream(format!("Completion request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read completion response: {}", e)))?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ProviderErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| text.trim().to_string());
            warn!(status = status.as_u16(), "[CHAT] Provider error: {}", reason);
            return Err(AppError::Upstream(format!("Provider returned {}: {}", status, reason)));
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| AppError::Upstream(format!("Malformed completion response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::Upstream(NO_RESPONSE.to_string()))
    }
}

// endregion: --- OpenAI-compatible provider
