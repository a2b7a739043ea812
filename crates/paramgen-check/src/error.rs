//! Errors reported to consumers of generated parameter modules.

use thiserror::Error;

/// Result type for decoding and validating parameters
pub type Result<T> = std::result::Result<T, Error>;

/// Raised while turning an untyped map into a parameter record.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A key with no matching parameter
    #[error("unknown parameter \"{key}\"")]
    UnknownKey { key: String },

    /// A value whose JSON kind does not match the declared parameter type
    #[error("parameter \"{key}\" must be {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: String,
        found: &'static str,
    },

    /// The shape checked out but serde still rejected it
    #[error("failed to decode parameters: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Raised by the generated `Params::validate`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("parameter validation not yet supported for object type \"{0}\"")]
    UnsupportedObject(String),

    #[error("required parameter validation is currently only supported for strings, but {0} is not")]
    RequiredNotString(String),

    /// Every accumulated per-field message
    #[error("invalid parameters: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

/// Umbrella error for generated entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Type-erased parameters were not of the expected record type
    #[error("parameters are not of type {expected}")]
    ParamsType { expected: &'static str },
}
