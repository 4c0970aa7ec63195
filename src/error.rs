use std::fmt;
use std::io;

/// Error type for record-store operations.
///
/// Every variant maps to an HTTP status via [`Error::status_code`]; handlers
/// report it as a JSON body with a `message` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Payload validation failed (missing required field, non-numeric value
    /// where a number was expected). No mutation occurred.
    Validation(String),
    /// Create with a key that already exists in the collection.
    DuplicateKey {
        collection: &'static str,
        key: String,
    },
    /// Update or delete with a key no record has.
    NotFound {
        collection: &'static str,
        key: String,
    },
    /// Durable storage I/O failure.
    Persistence(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "{}", msg),
            Error::DuplicateKey { collection, key } => {
                write!(f, "{}: a record with key '{}' already exists", collection, key)
            }
            Error::NotFound { collection, key } => {
                write!(f, "{}: no record with key '{}'", collection, key)
            }
            Error::Persistence(msg) => write!(f, "persistence error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}

impl Error {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::DuplicateKey { .. } => 400,
            Error::NotFound { .. } => 404,
            Error::Persistence(_) => 500,
        }
    }
}
