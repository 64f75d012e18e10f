//! Bosques chat relay - axum HTTP service between the concierge and the
//! completion provider.
//!
//! Holds the provider credential server-side, validates the forwarded
//! transcript, calls the provider and maps its failures to a small set of
//! JSON error bodies.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod upstream;

pub use error::RelayError;
pub use routes::{create_router, start_server};
pub use state::RelayState;
pub use upstream::{CompletionProvider, GrokProvider, UpstreamError};
