use thiserror::Error;

/// Top-level error type shared by the Bosques crates.
///
/// Subsystem crates define their own error types and implement
/// `From<BosquesError>` (or the reverse) so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BosquesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for BosquesError {
    fn from(err: toml::de::Error) -> Self {
        BosquesError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for BosquesError {
    fn from(err: toml::ser::Error) -> Self {
        BosquesError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for BosquesError {
    fn from(err: serde_json::Error) -> Self {
        BosquesError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Bosques operations.
pub type Result<T> = std::result::Result<T, BosquesError>;
