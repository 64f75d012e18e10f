//! Chat concierge client for Bosques California.
//!
//! Keeps the visible transcript, forwards a bounded slice of it to the chat
//! relay, falls back to fixed text when the relay fails, and decides when the
//! human-contact banner should appear.

pub mod client;
pub mod error;
pub mod escalation;
pub mod scripted;
pub mod session;
pub mod state;
pub mod transport;

pub use client::ConciergeClient;
pub use error::ChatError;
pub use escalation::EscalationClassifier;
pub use scripted::ScriptedResponder;
pub use session::ConciergeSession;
pub use state::{Action, ConciergeState};
pub use transport::{ChatTransport, RelayTransport};
