//! Template context preparation.
//!
//! Everything the template needs is computed here, before any text is
//! rendered: serialized blobs, static identifiers, field access paths and the
//! messages generated validation code will report. The template itself only
//! substitutes.

use std::collections::BTreeMap;

use paramgen_check::{ParameterDesc, ParameterType};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::serialize::to_blob;
use crate::utils::to_screaming_snake_case;

/// Root context handed to the template.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    /// `cfg` name under which the generated module is excluded
    pub build_tag: String,
    /// Path of the `Params` type as seen from the generated module
    pub params_path: String,
    pub elems: Vec<TemplateElem>,
}

/// One top-level parameter, ready for substitution.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateElem {
    pub name: String,
    /// Name of the generated `Lazy<ParameterDesc>` static
    pub const_name: String,
    /// Canonical JSON of the descriptor
    pub blob: String,
    /// Field of `Params` holding the value
    pub field: String,
    pub is_object: bool,
    pub is_string: bool,
    pub is_optional: bool,
    pub required: bool,
    pub enum_values: Vec<String>,
    pub required_message: String,
    /// Allowed values as listed in the invalid-value message
    pub allowed_display: String,
}

impl TemplateElem {
    pub fn from_desc(desc: &ParameterDesc) -> Result<Self> {
        Ok(Self {
            name: desc.name.clone(),
            const_name: const_name(&desc.name)?,
            blob: to_blob(desc)?,
            field: desc.struct_field_name.clone(),
            is_object: desc.param_type == ParameterType::Object,
            is_string: desc.param_type == ParameterType::String,
            is_optional: desc.is_optional,
            required: desc.required,
            enum_values: desc.enum_values.clone(),
            required_message: format!("required param {} not found", desc.name),
            allowed_display: format!("[{}]", desc.enum_values.join(" ")),
        })
    }
}

impl RenderContext {
    /// Prepare the context for a module exposing `descs`.
    ///
    /// Fails when two parameters map to the same static identifier.
    pub fn prepare(
        descs: &[ParameterDesc],
        params_path: impl Into<String>,
        build_tag: impl Into<String>,
    ) -> Result<Self> {
        let elems = descs
            .iter()
            .map(TemplateElem::from_desc)
            .collect::<Result<Vec<_>>>()?;

        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for elem in &elems {
            if let Some(previous) = seen.insert(&elem.const_name, &elem.name) {
                return Err(Error::template(format!(
                    "parameters {:?} and {:?} both generate the identifier {}",
                    previous, elem.name, elem.const_name
                )));
            }
        }

        Ok(Self {
            build_tag: build_tag.into(),
            params_path: params_path.into(),
            elems,
        })
    }
}

fn const_name(param_name: &str) -> Result<String> {
    let base = to_screaming_snake_case(param_name);
    if !base.starts_with(|c: char| c.is_ascii_alphabetic()) || !base.is_ascii() {
        return Err(Error::template(format!(
            "cannot derive a Rust identifier from parameter name {:?}",
            param_name
        )));
    }
    Ok(format!("{base}_PARAM_DESC"))
}
