//! Chat-completion client.
//!
//! A single outbound call per analysis. The client maps upstream HTTP status to
//! [`UpstreamError`] and hands back the assistant text without interpreting it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::prompt::{Message, Prompt};
use crate::{CoreError, CoreResult, UpstreamError};

/// Sends a prompt to a language model and returns the raw reply text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, UpstreamError>;
}

/// OpenAI-compatible chat-completion gateway client.
pub struct GatewayClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl GatewayClient {
    /// Build a client with the configured timeout applied to every request.
    pub fn new(config: &CompletionConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: config.url().to_string(),
            api_key: config.api_key().to_string(),
            model: config.model().to_string(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [&'a Message; 2],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for GatewayClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, UpstreamError> {
        let body = ChatRequest {
            model: &self.model,
            messages: prompt.messages(),
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable {
                status: None,
                body: if e.is_timeout() {
                    format!("request timed out: {e}")
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = (!text.is_empty()).then(|| text.clone());
            return Err(match status.as_u16() {
                429 => UpstreamError::RateLimited(detail),
                402 => UpstreamError::PaymentRequired(detail),
                code => UpstreamError::Unavailable {
                    status: Some(code),
                    body: text,
                },
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| UpstreamError::Malformed("no message content in first choice".into()))
    }
}
