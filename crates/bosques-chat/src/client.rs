//! Concierge client: builds the forwarded transcript and shields callers
//! from every relay failure.

use std::sync::Arc;
use std::time::Duration;

use bosques_core::config::ConciergeConfig;
use bosques_core::locale;
use bosques_core::prompt::system_prompt;
use bosques_core::types::{ChatMessage, PromptMessage};

use crate::error::ChatError;
use crate::scripted::ScriptedResponder;
use crate::transport::{ChatTransport, RelayTransport};

enum Backend {
    Relay(Arc<dyn ChatTransport>),
    Scripted {
        responder: ScriptedResponder,
        delay: Duration,
    },
}

/// Answers user messages through the relay or, without one, from scripts.
pub struct ConciergeClient {
    backend: Backend,
    system_prompt: String,
    history_limit: usize,
}

impl ConciergeClient {
    /// Client that forwards transcripts through `transport`.
    pub fn with_transport(transport: Arc<dyn ChatTransport>, history_limit: usize) -> Self {
        Self {
            backend: Backend::Relay(transport),
            system_prompt: system_prompt(),
            history_limit,
        }
    }

    /// Client that answers from the scripted responder after `delay`.
    pub fn scripted(delay: Duration) -> Self {
        Self {
            backend: Backend::Scripted {
                responder: ScriptedResponder,
                delay,
            },
            system_prompt: system_prompt(),
            history_limit: ConciergeConfig::default().history_limit,
        }
    }

    /// Build a client from configuration: relay mode when `relay_url` is set,
    /// scripted mode otherwise.
    pub fn from_config(config: &ConciergeConfig) -> Result<Self, ChatError> {
        match config.relay_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => {
                let transport = RelayTransport::new(url)?;
                tracing::info!(endpoint = %transport.endpoint(), "Concierge using chat relay");
                Ok(Self::with_transport(
                    Arc::new(transport),
                    config.history_limit,
                ))
            }
            _ => {
                tracing::info!("No relay endpoint configured, concierge in scripted mode");
                Ok(Self::scripted(Duration::from_millis(config.scripted_delay_ms)))
            }
        }
    }

    /// Override the system instruction.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn is_scripted(&self) -> bool {
        matches!(self.backend, Backend::Scripted { .. })
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// The messages forwarded for `user_text`: system prompt, the last
    /// `history_limit` entries of `history`, then the new user message.
    pub fn build_transcript(&self, user_text: &str, history: &[ChatMessage]) -> Vec<PromptMessage> {
        let start = history.len().saturating_sub(self.history_limit);
        let mut messages = Vec::with_capacity(history.len() - start + 2);
        messages.push(PromptMessage::system(self.system_prompt.clone()));
        messages.extend(history[start..].iter().map(PromptMessage::from));
        messages.push(PromptMessage::user(user_text));
        messages
    }

    /// Produce the concierge reply for `user_text`.
    ///
    /// Never fails: relay errors are logged and replaced by the fixed apology.
    pub async fn send_message(&self, user_text: &str, history: &[ChatMessage]) -> String {
        match &self.backend {
            Backend::Relay(transport) => {
                let messages = self.build_transcript(user_text, history);
                tracing::debug!(forwarded = messages.len(), "Sending transcript to relay");
                match transport.send_transcript(&messages).await {
                    Ok(reply) => reply,
                    Err(e) if e.is_rate_limited() => {
                        tracing::warn!(error = %e, "Chat relay reports high demand, using fallback reply");
                        locale::FALLBACK_APOLOGY.to_string()
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Chat relay failed, using fallback reply");
                        locale::FALLBACK_APOLOGY.to_string()
                    }
                }
            }
            Backend::Scripted { responder, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                responder.respond(user_text).to_string()
            }
        }
    }
}
