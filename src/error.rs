use thiserror::Error;

/// Subwave's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Subwave's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// The audio container or buffer violates a format invariant
    /// (sample width, sample rate, or sample alignment).
    #[error("unsupported audio format: {message}")]
    Format { message: String },

    /// A frame presented to a classifier did not have the exact byte length
    /// the framer produces for the current sample rate and frame duration.
    #[error("invalid frame: expected {expected} bytes, got {actual}")]
    InvalidFrame { expected: usize, actual: usize },

    /// Zero-length audio or an empty span sequence. Callers may treat this as
    /// non-fatal and degrade to a well-formed empty output.
    #[error("empty input: {message}")]
    EmptyInput { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    pub(crate) fn empty(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => Self::Io(io),
            other => Self::Format {
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Message(err.to_string())
    }
}
