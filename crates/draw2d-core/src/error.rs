//! Error handling for Draw2D
//!
//! Provides the error types for all layers:
//! - `ChangeRejected`: a listener vetoed a pending change (recoverable)
//! - `DrawingError`: container operations (veto or index out of range)
//! - `Error`: crate-wide error for configuration and I/O
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// The rejection signal of the before/after change protocol
///
/// A listener returns `Err(ChangeRejected)` from a before-change event to
/// veto the pending mutation. The mutator aborts without changing any state
/// and hands the same value back to its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("change rejected: {reason}")]
pub struct ChangeRejected {
    reason: String,
}

impl ChangeRejected {
    /// Create a rejection with a human-readable reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason given by the rejecting listener
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors raised by `Drawing` operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawingError {
    /// A drawing-level listener vetoed the operation
    #[error(transparent)]
    Rejected(#[from] ChangeRejected),

    /// Index outside the z-order range
    #[error("index {index} out of bounds for drawing with {len} shapes")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of shapes in the drawing at the time of the call.
        len: usize,
    },
}

impl DrawingError {
    /// Check if this error is a veto
    pub fn is_rejection(&self) -> bool {
        matches!(self, DrawingError::Rejected(_))
    }

    /// The veto, if this error is one
    pub fn rejection(&self) -> Option<&ChangeRejected> {
        match self {
            DrawingError::Rejected(r) => Some(r),
            DrawingError::IndexOutOfBounds { .. } => None,
        }
    }
}

/// Main error type for Draw2D
#[derive(Error, Debug)]
pub enum Error {
    /// A change was vetoed
    #[error(transparent)]
    Rejected(#[from] ChangeRejected),

    /// Drawing container error
    #[error(transparent)]
    Drawing(#[from] DrawingError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this error is a veto, directly or through a drawing operation
    pub fn is_rejection(&self) -> bool {
        match self {
            Error::Rejected(_) => true,
            Error::Drawing(e) => e.is_rejection(),
            _ => false,
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
