use crate::{render::LengthMismatch, store::StoreError};
use thiserror::Error;

/// Result type alias for diffkeep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Outcomes of submitting or retrieving a diff other than success
#[derive(Debug, Error)]
pub enum Error {
    /// The submission is missing a field, is not valid JSON or cannot be compared
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// Both texts are identical line for line; nothing was stored
    #[error("data not changed")]
    NoChangeDetected,

    /// The identifier is malformed or unknown
    #[error("diff '{id}' not found")]
    RecordNotFound { id: String },

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Stable classification of [`Error`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    NoChangeDetected,
    RecordNotFound,
    StoreUnavailable,
}

impl ErrorKind {
    /// Stable code for logs and API consumers
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::NoChangeDetected => "no_change_detected",
            ErrorKind::RecordNotFound => "record_not_found",
            ErrorKind::StoreUnavailable => "store_unavailable",
        }
    }
}

impl Error {
    pub fn malformed_input<S: Into<String>>(reason: S) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn record_not_found<S: Into<String>>(id: S) -> Self {
        Self::RecordNotFound { id: id.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedInput { .. } => ErrorKind::MalformedInput,
            Error::NoChangeDetected => ErrorKind::NoChangeDetected,
            Error::RecordNotFound { .. } => ErrorKind::RecordNotFound,
            Error::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }
}

impl From<LengthMismatch> for Error {
    fn from(e: LengthMismatch) -> Self {
        Self::malformed_input(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::malformed_input(e.to_string())
    }
}
