use std::fmt::Display;

use bincode::ErrorKind;

/// Custom Result type for MiniSQL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for MiniSQL
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed SQL text, raised by the lexer or the parser
    Parse(String),
    /// Statement rejected by the table store (depends on database state)
    Execution(String),
    /// Internal error (key encoding, row serialization)
    Internal(String),
}

impl From<Box<ErrorKind>> for Error {
    fn from(value: Box<ErrorKind>) -> Self {
        Error::Internal(value.to_string())
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "syntax error: {}", err),
            Error::Execution(err) => write!(f, "{}", err),
            Error::Internal(err) => write!(f, "internal error: {}", err),
        }
    }
}
