//! Runtime support for generated parameter modules.
//!
//! Every `gen_params.rs` written by `paramgen` depends on this crate: it
//! reconstructs its descriptors from embedded JSON blobs with
//! [`must_parse_parameter_desc`], decodes untyped maps with
//! [`decode_params`], and reports problems through the error types below.

pub mod decode;
pub mod desc;
pub mod error;

pub use crate::{
    decode::{decode_params, ParamMap},
    desc::{must_parse_parameter_desc, ParameterDesc, ParameterType},
    error::{DecodeError, Error, Result, ValidationError},
};

/// Lazily initialised statics used by generated code.
pub use once_cell::sync::Lazy;

use std::any::Any;

/// A finding reported by a check instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
}

/// A parsed and validated parameter record with its concrete type erased.
pub type AnyParams = Box<dyn Any + Send + Sync>;

/// A configured check, ready to run against an object.
pub type CheckFunc = Box<dyn Fn(&serde_json::Value) -> Vec<Diagnostic> + Send + Sync>;

/// Instantiates a check from type-erased parameters.
pub type InstantiateFn = Box<dyn Fn(AnyParams) -> Result<CheckFunc> + Send + Sync>;
