//! Error types for ice-plain.
//!
//! Every conversion either produces a complete result or fails with one of
//! these errors. There are no partial results.

use thiserror::Error;

/// All ice-plain errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A type name or runtime type could not be resolved against the catalog,
    /// even after rebuilding the name cache once.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// The operation is refused by contract (decoding a remote reference).
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// The plain input is tagged but does not have the shape of its tag.
    #[error("invalid plain value: {0}")]
    InvalidPlain(String),

    /// A type definition was rejected by the catalog.
    #[error("invalid type definition: {0}")]
    Definition(String),

    /// JSON text could not be produced or parsed.
    #[error("json error: {0}")]
    Json(String),
}

/// Result type for ice-plain operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a lookup failure.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Error::Lookup(_))
    }

    /// Check if this is a refused operation.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported(_))
    }

    /// Check if the plain input was malformed.
    pub fn is_invalid_plain(&self) -> bool {
        matches!(self, Error::InvalidPlain(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
