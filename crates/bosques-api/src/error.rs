//! Relay error type and JSON error response formatting.
//!
//! Every failure leaves the relay as `{"error": "..."}`. Details stay in the
//! server log; clients only ever see the fixed messages below.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bosques_core::locale;
use bosques_core::types::RelayErrorBody;

use crate::upstream::UpstreamError;

/// Relay error that maps to an HTTP status code and a JSON body.
#[derive(Debug)]
pub enum RelayError {
    /// 400 - body is not JSON or lacks a well-formed `messages` sequence.
    InvalidRequest,
    /// 413 - body exceeds the configured limit.
    PayloadTooLarge,
    /// 429 - the provider is rate limiting us.
    HighDemand,
    /// 500 - the provider credential is not configured.
    MissingCredential,
    /// 500 - any other provider failure.
    Upstream,
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::HighDemand => StatusCode::TOO_MANY_REQUESTS,
            RelayError::MissingCredential | RelayError::Upstream => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RelayError::InvalidRequest => locale::INVALID_REQUEST,
            RelayError::PayloadTooLarge => locale::PAYLOAD_TOO_LARGE,
            RelayError::HighDemand => locale::HIGH_DEMAND,
            RelayError::MissingCredential => locale::INTERNAL_ERROR,
            RelayError::Upstream => locale::UPSTREAM_FAILURE,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = RelayErrorBody {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<UpstreamError> for RelayError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::RateLimited => RelayError::HighDemand,
            UpstreamError::MissingCredential => RelayError::MissingCredential,
            UpstreamError::Status { .. }
            | UpstreamError::Transport(_)
            | UpstreamError::InvalidResponse(_) => RelayError::Upstream,
        }
    }
}
