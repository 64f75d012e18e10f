//! Error types for the concierge client.

/// Errors from the concierge client and its transport.
///
/// None of these reach the visible transcript: the client converts transport
/// failures into the fixed apology text.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a reply is still pending")]
    AwaitingReply,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("relay returned {status}: {message}")]
    Relay { status: u16, message: String },
    #[error("invalid relay response: {0}")]
    InvalidResponse(String),
}

impl ChatError {
    /// Whether the relay reported an upstream rate limit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ChatError::Relay { status: 429, .. })
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChatError::InvalidResponse(err.to_string())
        } else {
            ChatError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::AwaitingReply.to_string(),
            "a reply is still pending"
        );
        assert_eq!(
            ChatError::Transport("connection refused".to_string()).to_string(),
            "transport error: connection refused"
        );
        assert_eq!(
            ChatError::Relay {
                status: 500,
                message: "Error contacting AI service".to_string()
            }
            .to_string(),
            "relay returned 500: Error contacting AI service"
        );
        assert_eq!(
            ChatError::InvalidResponse("missing field".to_string()).to_string(),
            "invalid relay response: missing field"
        );
    }

    #[test]
    fn test_is_rate_limited() {
        let err = ChatError::Relay {
            status: 429,
            message: "busy".to_string(),
        };
        assert!(err.is_rate_limited());

        let err = ChatError::Relay {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_rate_limited());
        assert!(!ChatError::EmptyMessage.is_rate_limited());
    }
}
