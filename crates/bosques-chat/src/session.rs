//! Drives a [`ConciergeState`] with a [`ConciergeClient`].

use bosques_core::config::ConciergeConfig;
use bosques_core::locale;
use bosques_core::types::ChatMessage;

use crate::client::ConciergeClient;
use crate::error::ChatError;
use crate::state::{Action, ConciergeState};

/// One user's chat session: reducer state plus the client answering it.
///
/// `submit` takes `&mut self` across the relay call, so a session can have
/// at most one request in flight.
pub struct ConciergeSession {
    state: ConciergeState,
    client: ConciergeClient,
}

impl ConciergeSession {
    pub fn new(state: ConciergeState, client: ConciergeClient) -> Self {
        Self { state, client }
    }

    pub fn from_config(config: &ConciergeConfig) -> Result<Self, ChatError> {
        Ok(Self::new(
            ConciergeState::from_config(config),
            ConciergeClient::from_config(config)?,
        ))
    }

    pub fn state(&self) -> &ConciergeState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), ChatError> {
        self.state.dispatch(action)
    }

    /// Send `text` and append exactly one concierge reply.
    ///
    /// Returns the appended reply. Fails only when the reducer rejects the
    /// input (blank text, reply pending); relay failures become the fallback
    /// reply. If the returned future is dropped before the reply arrives, the
    /// fallback reply is appended so the session accepts input again.
    pub async fn submit(&mut self, text: &str) -> Result<&ChatMessage, ChatError> {
        let history = self.state.messages().to_vec();
        self.state.dispatch(Action::Send(text.to_string()))?;

        let pending = PendingReply {
            state: Some(&mut self.state),
        };
        let reply = self.client.send_message(text, &history).await;
        pending.settle(reply)?;

        self.state
            .messages()
            .last()
            .ok_or_else(|| ChatError::InvalidResponse("transcript is empty".to_string()))
    }
}

/// Owns the awaiting-reply window of one `submit` call.
struct PendingReply<'a> {
    state: Option<&'a mut ConciergeState>,
}

impl PendingReply<'_> {
    fn settle(mut self, reply: String) -> Result<(), ChatError> {
        match self.state.take() {
            Some(state) => state.dispatch(Action::Receive(reply)),
            None => Ok(()),
        }
    }
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            tracing::warn!("Reply abandoned before it arrived, appending fallback");
            // Receive never fails.
            let _ = state.dispatch(Action::Receive(locale::FALLBACK_APOLOGY.to_string()));
        }
    }
}
