use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Transcript
// =============================================================================

/// Author of a visible transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    /// The concierge (model reply, scripted answer, or fallback).
    Ai,
}

/// One entry of the visible chat transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Role::Ai, text)
    }
}

// =============================================================================
// Wire format (client <-> relay <-> provider)
// =============================================================================

/// Role of a message forwarded to the completion provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

impl From<Role> for PromptRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => PromptRole::User,
            Role::Ai => PromptRole::Assistant,
        }
    }
}

/// A role-tagged message in the OpenAI-compatible chat format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

impl From<&ChatMessage> for PromptMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.into(),
            content: msg.text.clone(),
        }
    }
}

/// Request body of `POST /chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub messages: Vec<PromptMessage>,
}

/// Success body of `POST /chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReply {
    pub message: String,
}

/// Error body returned by the relay for every non-2xx status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: String,
}
