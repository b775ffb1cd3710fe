//! Error types for folio.
//!
//! Runtime lookups (unknown sections, unknown projects, missing page elements)
//! never produce errors; they degrade to no-ops. The errors defined here are
//! raised at the edges only: loading configuration and loading catalog files.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for folio operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Catalog Errors ===
    /// Failed to read a catalog file.
    #[error("failed to read catalog at {path}: {source}")]
    CatalogRead {
        /// Path to the catalog file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A catalog file could not be parsed.
    #[error("failed to parse catalog at {path}: {source}")]
    CatalogParse {
        /// Path to the catalog file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Catalog contents failed validation.
    #[error("invalid catalog: {message}")]
    CatalogValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Replay Errors ===
    /// A replay script could not be read or parsed.
    #[error("invalid replay script: {0}")]
    ReplayScript(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for folio operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a catalog validation error.
    #[must_use]
    pub fn catalog_validation(message: impl Into<String>) -> Self {
        Self::CatalogValidation {
            message: message.into(),
        }
    }

    /// Create a replay script error.
    #[must_use]
    pub fn replay_script(message: impl Into<String>) -> Self {
        Self::ReplayScript(message.into())
    }
}
