//! Shared relay state, passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use bosques_core::config::ServerConfig;

use crate::upstream::CompletionProvider;

/// Shared relay state.
///
/// Read-only after startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct RelayState {
    /// Completion provider that answers forwarded transcripts.
    pub provider: Arc<dyn CompletionProvider>,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl RelayState {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            body_limit: ServerConfig::default().body_limit_bytes,
            start_time: Instant::now(),
        }
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }
}
