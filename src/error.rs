//! Error types for the payload-synonym library.
//!
//! All errors are represented by the [`PayloadSynonymError`] enum. Faults
//! raised by an upstream [`TokenStream`](crate::analysis::token::TokenStream)
//! are handed back to the caller unchanged; the only error the synonym filter
//! produces on its own is [`PayloadSynonymError::PayloadDecode`].
//!
//! # Examples
//!
//! ```
//! use payload_synonym::error::{PayloadSynonymError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PayloadSynonymError::invalid_config("delimiter must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// The main error type for payload-synonym operations.
#[derive(Error, Debug)]
pub enum PayloadSynonymError {
    /// I/O errors (reading token dumps, config files, writing output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A token payload could not be decoded as UTF-8 text.
    #[error("Payload decode error for token {token:?}: {source}")]
    PayloadDecode {
        /// Text of the token carrying the bad payload
        token: String,
        #[source]
        source: Utf8Error,
    },

    /// Analysis-related errors raised by token streams
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid filter configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with PayloadSynonymError.
pub type Result<T> = std::result::Result<T, PayloadSynonymError>;

impl PayloadSynonymError {
    /// Create a new payload decode error.
    pub fn payload_decode<S: Into<String>>(token: S, source: Utf8Error) -> Self {
        PayloadSynonymError::PayloadDecode {
            token: token.into(),
            source,
        }
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PayloadSynonymError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PayloadSynonymError::InvalidConfig(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        PayloadSynonymError::InvalidOperation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PayloadSynonymError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = PayloadSynonymError::invalid_config("bad delimiter");
        assert_eq!(error.to_string(), "Invalid configuration: bad delimiter");

        let error = PayloadSynonymError::invalid_operation("stream is closed");
        assert_eq!(error.to_string(), "Invalid operation: stream is closed");
    }

    #[test]
    fn test_payload_decode_error() {
        let bytes = vec![0xff, 0xfe];
        let source = std::str::from_utf8(&bytes).unwrap_err();
        let error = PayloadSynonymError::payload_decode("A", source);

        assert!(error.to_string().starts_with("Payload decode error for token \"A\""));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = PayloadSynonymError::from(io_error);

        match error {
            PayloadSynonymError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
