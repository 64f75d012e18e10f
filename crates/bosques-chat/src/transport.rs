//! Transport seam between the concierge client and the chat relay.

use std::time::Duration;

use async_trait::async_trait;
use bosques_core::types::{PromptMessage, RelayErrorBody, RelayReply, RelayRequest};

use crate::error::ChatError;

/// Sends a full transcript to a completion backend and returns its text reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_transcript(&self, messages: &[PromptMessage]) -> Result<String, ChatError>;
}

/// HTTP transport to the relay's `POST /chat` endpoint.
pub struct RelayTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl RelayTransport {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(endpoint: impl Into<String>) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(Self::DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for RelayTransport {
    async fn send_transcript(&self, messages: &[PromptMessage]) -> Result<String, ChatError> {
        let body = RelayRequest {
            messages: messages.to_vec(),
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RelayErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(ChatError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        let reply: RelayReply = response.json().await?;
        Ok(reply.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transcript() -> Vec<PromptMessage> {
        vec![
            PromptMessage::system("Eres el concierge"),
            PromptMessage::user("¿Precio del Roble?"),
        ]
    }

    #[tokio::test]
    async fn test_success_returns_message_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "Eres el concierge"},
                    {"role": "user", "content": "¿Precio del Roble?"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Desde ~$3.8 MDP."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = RelayTransport::new(format!("{}/chat", server.uri())).unwrap();
        let reply = transport.send_transcript(&transcript()).await.unwrap();
        assert_eq!(reply, "Desde ~$3.8 MDP.");
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_relay_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(serde_json::json!({"error": "alta demanda"})),
            )
            .mount(&server)
            .await;

        let transport = RelayTransport::new(server.uri()).unwrap();
        let err = transport.send_transcript(&transcript()).await.unwrap_err();
        assert!(err.is_rate_limited());
        match err {
            ChatError::Relay { message, .. } => assert_eq!(message, "alta demanda"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_with_plain_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let transport = RelayTransport::new(server.uri()).unwrap();
        let err = transport.send_transcript(&transcript()).await.unwrap_err();
        match err {
            ChatError::Relay { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "nope"})),
            )
            .mount(&server)
            .await;

        let transport = RelayTransport::new(server.uri()).unwrap();
        let err = transport.send_transcript(&transcript()).await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let transport = RelayTransport::new(format!("http://{addr}/chat")).unwrap();
        let err = transport.send_transcript(&transcript()).await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }
}
