//! Route handlers for the relay.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bosques_core::types::{RelayReply, RelayRequest};
use serde::{Deserialize, Serialize};

use crate::error::RelayError;
use crate::state::RelayState;

/// POST /chat - forward a transcript to the provider and return its reply.
///
/// The credential is checked before the body is even parsed, so a
/// misconfigured relay fails the same way for every request. Body rejections
/// are taken as a value so they also answer with a JSON error body.
pub async fn chat(
    State(state): State<RelayState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RelayReply>, RelayError> {
    if !state.provider.is_configured() {
        tracing::error!("Chat request rejected: provider credential not configured");
        return Err(RelayError::MissingCredential);
    }

    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Could not read chat request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RelayError::PayloadTooLarge
        } else {
            RelayError::InvalidRequest
        }
    })?;

    let request: RelayRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed chat request");
        RelayError::InvalidRequest
    })?;

    tracing::debug!(messages = request.messages.len(), "Forwarding transcript");
    let message = state
        .provider
        .complete(&request.messages)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Completion provider failed");
            RelayError::from(e)
        })?;

    Ok(Json(RelayReply { message }))
}

/// Response for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub credential_configured: bool,
}

/// GET /health - liveness plus whether the credential is present.
pub async fn health(State(state): State<RelayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        credential_configured: state.provider.is_configured(),
    })
}
