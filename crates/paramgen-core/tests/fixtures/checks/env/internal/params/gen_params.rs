// Code generated by paramgen. DO NOT EDIT.

#![cfg(not(param_codegen))]

use paramgen_check::{self as check, Lazy, ParameterDesc};

use super::Params;

pub static ENV_PARAM_DESC: Lazy<ParameterDesc> = Lazy::new(|| {
    check::must_parse_parameter_desc(r#"{
  "name": "env",
  "type": "string",
  "description": "The environment the workload is deployed to.",
  "examples": [
    "prod"
  ],
  "enum": [
    "dev",
    "staging",
    "prod"
  ],
  "required": true,
  "structFieldName": "env"
}"#)
});

pub static EXCLUDED_NAMESPACES_PARAM_DESC: Lazy<ParameterDesc> = Lazy::new(|| {
    check::must_parse_parameter_desc(r#"{
  "name": "excludedNamespaces",
  "type": "array",
  "description": "Namespaces to skip, matched literally.",
  "arrayElemType": "string",
  "noRegex": true,
  "structFieldName": "excluded_namespaces"
}"#)
});

pub static MAX_REPLICAS_PARAM_DESC: Lazy<ParameterDesc> = Lazy::new(|| {
    check::must_parse_parameter_desc(r#"{
  "name": "maxReplicas",
  "type": "integer",
  "description": "Upper bound on replicas.",
  "structFieldName": "max_replicas",
  "isOptional": true
}"#)
});

pub static TIER_PARAM_DESC: Lazy<ParameterDesc> = Lazy::new(|| {
    check::must_parse_parameter_desc(r#"{
  "name": "tier",
  "type": "string",
  "description": "Support tier of the owning team.",
  "enum": [
    "gold",
    "silver"
  ],
  "structFieldName": "tier",
  "isOptional": true
}"#)
});

/// Every parameter of [`Params`], in declaration order.
pub static PARAM_DESCS: Lazy<Vec<ParameterDesc>> = Lazy::new(|| {
    vec![
        ParameterDesc::clone(&ENV_PARAM_DESC),
        ParameterDesc::clone(&EXCLUDED_NAMESPACES_PARAM_DESC),
        ParameterDesc::clone(&MAX_REPLICAS_PARAM_DESC),
        ParameterDesc::clone(&TIER_PARAM_DESC),
    ]
});

impl Params {
    /// Checks the constraints declared on each parameter.
    #[allow(unreachable_code, unused_mut)]
    pub fn validate(&self) -> Result<(), check::ValidationError> {
        let mut validation_errors: Vec<String> = Vec::new();
        if self.env.is_empty() {
            validation_errors.push("required param env not found".to_string());
        }
        if !["dev", "staging", "prod"].contains(&self.env.as_str()) {
            validation_errors.push(format!(
                "param {} has invalid value {:?}, must be one of {}",
                "env",
                self.env,
                "[dev staging prod]"
            ));
        }
        if let Some(value) = self.tier.as_deref() {
            if !["gold", "silver"].contains(&value) {
                validation_errors.push(format!(
                    "param {} has invalid value {:?}, must be one of {}",
                    "tier",
                    value,
                    "[gold silver]"
                ));
            }
        }
        if !validation_errors.is_empty() {
            return Err(check::ValidationError::Invalid(validation_errors));
        }
        Ok(())
    }
}

/// Decodes a raw parameter map and validates the result.
pub fn parse_and_validate(params: &check::ParamMap) -> check::Result<Params> {
    let parsed: Params = check::decode_params(params, &PARAM_DESCS)?;
    parsed.validate()?;
    Ok(parsed)
}

/// Same as [`parse_and_validate`], with the record type erased.
pub fn parse_and_validate_any(params: &check::ParamMap) -> check::Result<check::AnyParams> {
    let parsed: check::AnyParams = Box::new(parse_and_validate(params)?);
    Ok(parsed)
}

/// Adapts a constructor taking [`Params`] to one taking erased parameters.
pub fn wrap_instantiate_func<F>(f: F) -> check::InstantiateFn
where
    F: Fn(Params) -> check::Result<check::CheckFunc> + Send + Sync + 'static,
{
    Box::new(move |params: check::AnyParams| {
        let params = params
            .downcast::<Params>()
            .map_err(|_| check::Error::ParamsType { expected: "Params" })?;
        f(*params)
    })
}
