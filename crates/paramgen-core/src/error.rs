//! Error handling for the paramgen code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! Errors raised deep inside extraction are wrapped on the way out with the
//! field and directory being processed, so the final message reads like
//! `processing dir foo: handling field limits: currently unsupported type ...`.
//!
//! # Examples
//!
//! ```
//! use paramgen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::extract("currently unsupported type char"))
//! }
//!
//! let err = might_fail().map_err(|e| e.in_field("name")).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "handling field name: Extraction error: currently unsupported type char"
//! );
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for paramgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for paramgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rust source that does not parse
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    /// Structural problem locating the `Params` type
    #[error("Load error: {0}")]
    Load(String),

    /// Unsupported shape encountered during descriptor extraction
    #[error("Extraction error: {0}")]
    Extract(String),

    /// Malformed metadata annotation
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("handling field {field}: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<Error>,
    },

    #[error("processing dir {}: {source}", dir.display())]
    Dir {
        dir: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a new load error
    pub fn load<S: Into<String>>(msg: S) -> Self {
        Self::Load(msg.into())
    }

    /// Create a new extraction error
    pub fn extract<S: Into<String>>(msg: S) -> Self {
        Self::Extract(msg.into())
    }

    /// Create a new annotation error
    pub fn annotation<S: Into<String>>(msg: S) -> Self {
        Self::Annotation(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Wrap this error with the field being handled
    pub fn in_field<S: Into<String>>(self, field: S) -> Self {
        Self::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with the directory being processed
    pub fn in_dir(self, dir: impl Into<PathBuf>) -> Self {
        Self::Dir {
            dir: dir.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, past any field or directory context
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Field { source, .. } | Self::Dir { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
