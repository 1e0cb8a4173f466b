//! Error types for the Signpost library.
//!
//! All fallible operations return [`Result`], whose error type is
//! [`SignpostError`].
//!
//! # Examples
//!
//! ```
//! use signpost::error::{Result, SignpostError};
//!
//! fn load() -> Result<()> {
//!     Err(SignpostError::config("fallback_threshold must be finite"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Signpost operations.
#[derive(Error, Debug)]
pub enum SignpostError {
    /// I/O errors (reading catalog or config files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Feature catalog construction errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Router configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Embedding provider failures
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SignpostError.
pub type Result<T> = std::result::Result<T, SignpostError>;

impl SignpostError {
    /// Create a new catalog error.
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        SignpostError::Catalog(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SignpostError::Config(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        SignpostError::Embedding(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SignpostError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SignpostError::InvalidOperation(format!("Invalid argument: {}", msg.into()))
    }
}
