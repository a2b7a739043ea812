//! Parameter descriptors shared by the generator and generated code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The type of a single parameter as seen by configuration authors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParameterType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one configuration parameter of a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDesc {
    /// External name used in configuration maps
    pub name: String,

    #[serde(rename = "type")]
    pub param_type: ParameterType,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,

    /// Allowed values, empty when unconstrained
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    /// Element type, set only for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_elem_type: Option<ParameterType>,

    /// Nested parameters, set only for objects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_parameters: Vec<ParameterDesc>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub no_regex: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub not_negatable: bool,

    /// Rust identifier of the field this parameter was extracted from
    pub struct_field_name: String,

    /// The field was declared as `Option<T>`
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_optional: bool,
}

impl ParameterDesc {
    /// A bare descriptor; the remaining fields are filled in by the caller.
    pub fn new(
        name: impl Into<String>,
        param_type: ParameterType,
        struct_field_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: String::new(),
            examples: Vec::new(),
            enum_values: Vec::new(),
            array_elem_type: None,
            sub_parameters: Vec::new(),
            required: false,
            no_regex: false,
            not_negatable: false,
            struct_field_name: struct_field_name.into(),
            is_optional: false,
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Parses a descriptor blob embedded by the generator.
///
/// # Panics
///
/// Panics if `blob` is not a valid descriptor. Blobs are written by the
/// generator, so a failure here means the generated file was edited or the
/// generator is broken.
pub fn must_parse_parameter_desc(blob: &str) -> ParameterDesc {
    match serde_json::from_str(blob) {
        Ok(desc) => desc,
        Err(e) => panic!("invalid embedded parameter descriptor: {e}\n{blob}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_blob() {
        let desc = must_parse_parameter_desc(
            r#"{"name": "env", "type": "string", "structFieldName": "env"}"#,
        );
        assert_eq!(desc, ParameterDesc::new("env", ParameterType::String, "env"));
    }

    #[test]
    fn test_serialization_skips_defaults() {
        let mut desc = ParameterDesc::new("paths", ParameterType::Array, "paths");
        desc.array_elem_type = Some(ParameterType::String);
        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "paths",
                "type": "array",
                "description": "",
                "arrayElemType": "string",
                "structFieldName": "paths"
            })
        );
    }

    #[test]
    #[should_panic(expected = "invalid embedded parameter descriptor")]
    fn test_malformed_blob_panics() {
        must_parse_parameter_desc("{\"name\": 3}");
    }

    #[test]
    fn test_type_display() {
        assert_eq!(ParameterType::Number.to_string(), "number");
        assert_eq!(ParameterType::Boolean.to_string(), "boolean");
    }
}
