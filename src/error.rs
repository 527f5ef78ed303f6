//! Unified error types for commpack.
//!
//! Almost nothing in the analysis pipeline is fatal: malformed blocks become
//! placeholders, bad timestamps become `None`, and impossible read latencies
//! are dropped. What remains here are caller-level failures such as I/O,
//! output encoding, invalid CLI dates, and an instant-messaging export that
//! matches no known layout.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for commpack operations.
///
/// # Example
///
/// ```rust
/// use commpack::error::Result;
/// use commpack::Message;
///
/// fn load() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, CommpackError>;

/// The error type for all commpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommpackError {
    /// An I/O error occurred while reading an export or writing a report.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse the input file.
    ///
    /// Contains the format being parsed, the underlying parse error,
    /// and optionally the file path.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "Message report")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The input doesn't match the expected structure.
    ///
    /// Raised when an instant-messaging export contains text but no line
    /// matches any known timestamp marker, or when an output extension is
    /// not recognized.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when an export or a rendered buffer is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The export text did not have the expected structure
    #[error("{0}")]
    Pattern(String),
}

impl From<std::string::FromUtf8Error> for CommpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        CommpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl CommpackError {
    /// Creates a parse error for the message report format.
    pub fn report_parse(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        CommpackError::Parse {
            format: "Message report",
            source: ParseErrorKind::Pattern(message.into()),
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        CommpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        CommpackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, CommpackError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, CommpackError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, CommpackError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, CommpackError::InvalidDate { .. })
    }
}
