//! Completion provider seam and the xAI Grok implementation.

use std::time::Duration;

use async_trait::async_trait;
use bosques_core::config::RelayConfig;
use bosques_core::types::PromptMessage;
use serde::{Deserialize, Serialize};

/// Errors from the completion provider.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("provider credential is not configured")]
    MissingCredential,

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::InvalidResponse(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// Turns a role-tagged transcript into the assistant's reply text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Whether the provider has the credential it needs to be called.
    fn is_configured(&self) -> bool;

    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, UpstreamError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [PromptMessage],
    model: &'a str,
    stream: bool,
    temperature: f64,
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

/// OpenAI-compatible chat completions client for xAI Grok.
pub struct GrokProvider {
    client: reqwest::Client,
    url: String,
    model: String,
    temperature: f64,
    api_key: Option<String>,
}

impl GrokProvider {
    pub fn new(config: &RelayConfig, api_key: Option<String>) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.upstream_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key,
        })
    }

    /// Build the provider with the credential taken from the environment
    /// variable named by `config.api_key_env`.
    pub fn from_config(config: &RelayConfig) -> Result<Self, UpstreamError> {
        let api_key = config.api_key();
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "Provider credential not set; /chat will answer 500"
            );
        }
        Self::new(config, api_key)
    }
}

#[async_trait]
impl CompletionProvider for GrokProvider {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredential)?;

        let body = CompletionRequest {
            messages,
            model: &self.model,
            stream: false,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %text, "Provider returned an error");
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(UpstreamError::RateLimited);
            }
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| UpstreamError::InvalidResponse("missing message content".to_string()))
    }
}
