//! Error types for ferro-protchange
//!
//! Notation parsing never fails. These errors cover the surfaces around it:
//! configuration files, input files, the weight column of batch input and
//! output serialization.

use thiserror::Error;

/// Main error type for ferro-protchange operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtChangeError {
    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// Configuration file could not be read or understood
    #[error("Invalid configuration in {source_name}: {msg}")]
    Config { source_name: String, msg: String },

    /// JSON serialization error
    #[error("JSON error: {msg}")]
    Json { msg: String },

    /// Occurrence weight column is not a positive integer
    #[error("Invalid weight '{value}' on line {line}: expected a positive integer")]
    InvalidWeight { line: usize, value: String },
}

impl ProtChangeError {
    /// Create a configuration error
    pub fn config(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        ProtChangeError::Config {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }
}

impl From<std::io::Error> for ProtChangeError {
    fn from(err: std::io::Error) -> Self {
        ProtChangeError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ProtChangeError {
    fn from(err: serde_json::Error) -> Self {
        ProtChangeError::Json {
            msg: err.to_string(),
        }
    }
}
