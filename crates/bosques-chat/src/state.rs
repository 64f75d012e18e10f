//! Concierge widget state as a single reducer.
//!
//! Valid actions:
//! - `Open` / `Close` / `Toggle`: panel visibility
//! - `Send(text)`: append a user entry and start awaiting a reply
//! - `Receive(text)`: append the concierge entry and stop awaiting
//! - `Reset`: back to the welcome transcript with escalation hidden

use bosques_core::config::ConciergeConfig;
use bosques_core::locale;
use bosques_core::types::{ChatMessage, Role};

use crate::error::ChatError;
use crate::escalation::EscalationClassifier;

/// An input to [`ConciergeState::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Open,
    Close,
    Toggle,
    Send(String),
    Receive(String),
    Reset,
}

/// Local state of one concierge chat session.
#[derive(Debug, Clone)]
pub struct ConciergeState {
    is_open: bool,
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
    show_escalation: bool,
    classifier: EscalationClassifier,
    check_user_text: bool,
}

impl Default for ConciergeState {
    fn default() -> Self {
        Self::new(EscalationClassifier::default())
    }
}

impl ConciergeState {
    pub fn new(classifier: EscalationClassifier) -> Self {
        Self {
            is_open: false,
            messages: vec![ChatMessage::ai(locale::WELCOME)],
            awaiting_reply: false,
            show_escalation: false,
            classifier,
            check_user_text: false,
        }
    }

    pub fn from_config(config: &ConciergeConfig) -> Self {
        Self::new(EscalationClassifier::from_config(config))
            .with_user_text_check(config.check_user_text)
    }

    /// Also classify the user's own messages.
    pub fn with_user_text_check(mut self, enabled: bool) -> Self {
        self.check_user_text = enabled;
        self
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether input is disabled because a reply is pending.
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn show_escalation(&self) -> bool {
        self.show_escalation
    }

    /// Apply an action.
    ///
    /// `Send` fails with [`ChatError::EmptyMessage`] for blank text and with
    /// [`ChatError::AwaitingReply`] while a reply is pending; the state is
    /// left unchanged in both cases.
    pub fn dispatch(&mut self, action: Action) -> Result<(), ChatError> {
        match action {
            Action::Open => self.is_open = true,
            Action::Close => self.is_open = false,
            Action::Toggle => self.is_open = !self.is_open,
            Action::Send(text) => {
                if text.trim().is_empty() {
                    return Err(ChatError::EmptyMessage);
                }
                if self.awaiting_reply {
                    return Err(ChatError::AwaitingReply);
                }
                if self.check_user_text && self.classifier.matches(&text) {
                    self.show_escalation = true;
                }
                self.messages.push(ChatMessage::new(Role::User, text));
                self.awaiting_reply = true;
            }
            Action::Receive(text) => {
                if self.classifier.matches(&text) {
                    if !self.show_escalation {
                        tracing::debug!("Escalation banner enabled");
                    }
                    self.show_escalation = true;
                }
                self.messages.push(ChatMessage::new(Role::Ai, text));
                self.awaiting_reply = false;
            }
            Action::Reset => {
                self.messages = vec![ChatMessage::ai(locale::WELCOME)];
                self.awaiting_reply = false;
                self.show_escalation = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ConciergeState::default();
        assert!(!state.is_open());
        assert!(!state.is_awaiting_reply());
        assert!(!state.show_escalation());
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].role, Role::Ai);
        assert_eq!(state.messages()[0].text, locale::WELCOME);
    }

    #[test]
    fn test_open_close_toggle() {
        let mut state = ConciergeState::default();
        state.dispatch(Action::Open).unwrap();
        assert!(state.is_open());
        state.dispatch(Action::Toggle).unwrap();
        assert!(!state.is_open());
        state.dispatch(Action::Toggle).unwrap();
        assert!(state.is_open());
        state.dispatch(Action::Close).unwrap();
        assert!(!state.is_open());
    }

    #[test]
    fn test_send_then_receive() {
        let mut state = ConciergeState::default();
        state.dispatch(Action::Send("hola".to_string())).unwrap();
        assert!(state.is_awaiting_reply());
        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.messages()[1].role, Role::User);

        state.dispatch(Action::Receive("X".to_string())).unwrap();
        assert!(!state.is_awaiting_reply());
        assert_eq!(state.messages().len(), 3);
        assert_eq!(state.messages()[2].role, Role::Ai);
        assert_eq!(state.messages()[2].text, "X");
    }

    #[test]
    fn test_blank_send_rejected() {
        let mut state = ConciergeState::default();
        let err = state.dispatch(Action::Send("   ".to_string())).unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
        assert_eq!(state.messages().len(), 1);
        assert!(!state.is_awaiting_reply());
    }

    #[test]
    fn test_send_while_awaiting_rejected() {
        let mut state = ConciergeState::default();
        state.dispatch(Action::Send("uno".to_string())).unwrap();
        let err = state.dispatch(Action::Send("dos".to_string())).unwrap_err();
        assert!(matches!(err, ChatError::AwaitingReply));
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn test_escalation_on_matching_reply() {
        let mut state = ConciergeState::default();
        state.dispatch(Action::Send("hola".to_string())).unwrap();
        state
            .dispatch(Action::Receive("Con gusto, le comunico con un Asesor.".to_string()))
            .unwrap();
        assert!(state.show_escalation());
    }

    #[test]
    fn test_no_escalation_on_plain_reply() {
        let mut state = ConciergeState::default();
        state.dispatch(Action::Send("quiero hablar con un humano".to_string())).unwrap();
        state
            .dispatch(Action::Receive("Desde ~$3.8 MDP.".to_string()))
            .unwrap();
        assert!(!state.show_escalation());
    }

    #[test]
    fn test_user_text_check_variant() {
        let mut state = ConciergeState::default().with_user_text_check(true);
        state.dispatch(Action::Send("quiero una cita".to_string())).unwrap();
        assert!(state.show_escalation());
    }

    #[test]
    fn test_escalation_is_sticky_until_reset() {
        let mut state = ConciergeState::default();
        state.dispatch(Action::Send("a".to_string())).unwrap();
        state.dispatch(Action::Receive("WhatsApp".to_string())).unwrap();
        state.dispatch(Action::Send("b".to_string())).unwrap();
        state.dispatch(Action::Receive("ok".to_string())).unwrap();
        assert!(state.show_escalation());

        state.dispatch(Action::Reset).unwrap();
        assert!(!state.show_escalation());
        assert_eq!(state.messages().len(), 1);
        assert!(!state.is_awaiting_reply());
    }

    #[test]
    fn test_reset_keeps_panel_open() {
        let mut state = ConciergeState::default();
        state.dispatch(Action::Open).unwrap();
        state.dispatch(Action::Reset).unwrap();
        assert!(state.is_open());
    }

    #[test]
    fn test_from_config_uses_keywords() {
        let config = ConciergeConfig {
            escalation_keywords: vec!["agente".to_string()],
            ..ConciergeConfig::default()
        };
        let mut state = ConciergeState::from_config(&config);
        state.dispatch(Action::Send("x".to_string())).unwrap();
        state.dispatch(Action::Receive("Un asesor".to_string())).unwrap();
        assert!(!state.show_escalation());
        state.dispatch(Action::Send("y".to_string())).unwrap();
        state.dispatch(Action::Receive("Un AGENTE".to_string())).unwrap();
        assert!(state.show_escalation());
    }
}
