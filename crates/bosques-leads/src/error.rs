//! Error types for lead capture.

/// Errors from the lead forms and their submitter.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LeadError {
    #[error("'{option}' is not a valid option for {field}")]
    InvalidOption { field: String, option: String },
    #[error("{0} does not accept this kind of input")]
    WrongInputKind(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("step {0} is incomplete")]
    IncompleteStep(u8),
    #[error("missing required fields: {0}")]
    MissingFields(String),
    #[error("invalid email address")]
    InvalidEmail,
    #[error("form is not ready to submit")]
    NotReady,
    #[error("submission failed: {0}")]
    Submission(String),
}
