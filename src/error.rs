//! Error types for deckclean library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for deckclean operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for deckclean library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reader or writer error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    NoInputFile(PathBuf),

    /// The input produced no column names.
    #[error("Could not read a header row from the input")]
    UnreadableHeader,

    /// A data row has more fields than the header (strict mode only).
    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A word-list resource could not be located.
    #[error("Resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// Text encoding error.
    #[error("Text encoding error: {0}")]
    Encoding(String),

    /// Option values that cannot be used for a run.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => {}
            csv::ErrorKind::Utf8 { .. } => return Error::Encoding(err.to_string()),
            _ => return Error::Csv(err.to_string()),
        }

        // Keep the original io::Error so callers can inspect its kind
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Error::Io(e),
            other => Error::Csv(format!("{:?}", other)),
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_row_message() {
        let err = Error::MalformedRow {
            line: 7,
            expected: 3,
            found: 5,
        };
        assert_eq!(
            err.to_string(),
            "Malformed row at line 7: expected 3 fields, found 5"
        );
    }

    #[test]
    fn test_no_input_file_message() {
        let err = Error::NoInputFile(PathBuf::from("missing.csv"));
        assert!(err.to_string().contains("missing.csv"));
    }
}
