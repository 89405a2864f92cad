//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library.
//!
//! # What is *not* an error
//!
//! An export with no recognisable timestamps, or a sender filter that matches
//! nothing, produces an empty record list and all-zero views. Callers never
//! need to special-case empty input.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Uploaded bytes are not valid UTF-8 text.
    #[error("UTF-8 decoding error in {context}: {source}")]
    Decode {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A configured timestamp pattern is not a valid regular expression.
    #[error("Invalid timestamp pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// The regex compilation error
        #[source]
        source: regex::Error,
    },

    /// A timestamp matched the pattern but could not be parsed.
    ///
    /// Only raised when the parser runs with
    /// [`InvalidTimestampPolicy::Fail`](crate::config::InvalidTimestampPolicy::Fail).
    #[error("Malformed timestamp '{input}' on line {line}")]
    MalformedTimestamp {
        /// 1-based line number of the timestamp in the export
        line: usize,
        /// The timestamp text that failed to parse
        input: String,
    },

    /// The input or a named option doesn't match a known format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A configuration file could not be parsed.
    #[error("Invalid configuration{}: {message}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Config {
        /// The config file, if the error came from one
        path: Option<PathBuf>,
        /// Description of what's wrong
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Account store error.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),
}

/// Kinds of account store errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    /// Sign-up with a username that is already taken.
    #[error("username '{0}' already exists")]
    UserExists(String),
    /// Unknown user or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Sign-up with a blank username.
    #[error("username must not be empty")]
    EmptyUsername,
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Decode {
            context: "chat export".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a decode error with context.
    pub fn decode(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatlensError::Decode {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        ChatlensError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates a malformed timestamp error.
    pub fn malformed_timestamp(line: usize, input: impl Into<String>) -> Self {
        ChatlensError::MalformedTimestamp {
            line,
            input: input.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates a configuration error.
    pub fn config(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        ChatlensError::Config {
            path,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if the input bytes were not valid text.
    pub fn is_decode(&self) -> bool {
        matches!(self, ChatlensError::Decode { .. })
    }

    /// Returns `true` if this is a malformed timestamp error.
    pub fn is_malformed_timestamp(&self) -> bool {
        matches!(self, ChatlensError::MalformedTimestamp { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlensError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if this is an account store error.
    pub fn is_account(&self) -> bool {
        matches!(self, ChatlensError::Account(_))
    }
}
