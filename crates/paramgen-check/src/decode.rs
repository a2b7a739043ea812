//! Schema-driven decoding of untyped parameter maps.
//!
//! The descriptor list is the schema: keys it does not name are rejected,
//! values are checked against the declared kinds, and absent non-optional
//! parameters take their zero value before serde sees the map.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::desc::{ParameterDesc, ParameterType};
use crate::error::DecodeError;

/// Untyped parameters as they arrive from configuration.
pub type ParamMap = Map<String, Value>;

/// Decodes `params` into `T`, checking it against `descs` first.
pub fn decode_params<T: DeserializeOwned>(
    params: &ParamMap,
    descs: &[ParameterDesc],
) -> Result<T, DecodeError> {
    let normalized = normalize_object(params, descs, None)?;
    Ok(serde_json::from_value(Value::Object(normalized))?)
}

fn normalize_object(
    params: &ParamMap,
    descs: &[ParameterDesc],
    parent: Option<&str>,
) -> Result<ParamMap, DecodeError> {
    if let Some(key) = params
        .keys()
        .find(|key| !descs.iter().any(|d| &d.name == *key))
    {
        return Err(DecodeError::UnknownKey {
            key: key_path(parent, key),
        });
    }

    let mut out = ParamMap::new();
    for desc in descs {
        match params.get(&desc.name) {
            None | Some(Value::Null) => {
                if !desc.is_optional {
                    out.insert(desc.name.clone(), zero_value(desc));
                }
            }
            Some(value) => {
                let key = key_path(parent, &desc.name);
                out.insert(desc.name.clone(), normalize_value(value, desc, &key)?);
            }
        }
    }
    Ok(out)
}

fn normalize_value(value: &Value, desc: &ParameterDesc, key: &str) -> Result<Value, DecodeError> {
    match desc.param_type {
        ParameterType::Array => {
            let Value::Array(items) = value else {
                return Err(mismatch(key, array_expectation(desc), value));
            };
            let elem_type = desc.array_elem_type.unwrap_or(ParameterType::String);
            items
                .iter()
                .enumerate()
                .map(|(i, item)| check_scalar(item, elem_type, &format!("{key}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        ParameterType::Object => match value {
            Value::Object(map) => {
                normalize_object(map, &desc.sub_parameters, Some(key)).map(Value::Object)
            }
            other => Err(mismatch(key, "object".to_string(), other)),
        },
        scalar => check_scalar(value, scalar, key),
    }
}

fn check_scalar(value: &Value, expected: ParameterType, key: &str) -> Result<Value, DecodeError> {
    let ok = match (expected, value) {
        (ParameterType::String, Value::String(_)) => true,
        (ParameterType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
        (ParameterType::Number, Value::Number(_)) => true,
        (ParameterType::Boolean, Value::Bool(_)) => true,
        _ => false,
    };
    if ok {
        Ok(value.clone())
    } else {
        Err(mismatch(key, expected.to_string(), value))
    }
}

fn zero_value(desc: &ParameterDesc) -> Value {
    match desc.param_type {
        ParameterType::String => Value::String(String::new()),
        ParameterType::Integer => Value::from(0),
        ParameterType::Number => Value::from(0.0),
        ParameterType::Boolean => Value::Bool(false),
        ParameterType::Array => Value::Array(Vec::new()),
        ParameterType::Object => Value::Object(
            desc.sub_parameters
                .iter()
                .filter(|sub| !sub.is_optional)
                .map(|sub| (sub.name.clone(), zero_value(sub)))
                .collect(),
        ),
    }
}

fn array_expectation(desc: &ParameterDesc) -> String {
    match desc.array_elem_type {
        Some(elem) => format!("array of {elem}"),
        None => "array".to_string(),
    }
}

fn mismatch(key: &str, expected: String, found: &Value) -> DecodeError {
    DecodeError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: kind_name(found),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn key_path(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}.{key}"),
        None => key.to_string(),
    }
}
