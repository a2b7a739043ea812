//! Canonical text form of a descriptor.
//!
//! The blob is embedded verbatim in generated code, so it must not change
//! unless the descriptor does: fields serialize in declaration order with a
//! fixed two-space indent.

use paramgen_check::ParameterDesc;

use crate::error::Result;

/// Pretty-printed JSON for `desc`, including its sub-parameters
pub fn to_blob(desc: &ParameterDesc) -> Result<String> {
    Ok(serde_json::to_string_pretty(desc)?)
}
