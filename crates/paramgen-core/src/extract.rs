//! Descriptor extraction from the `Params` record.
//!
//! Walks the record's fields in declaration order and produces one
//! [`ParameterDesc`] per field, recursing into nested records. Field types
//! are classified by their declared shape only:
//!
//! | Rust type                          | Parameter type |
//! |------------------------------------|----------------|
//! | `String`                           | `string`       |
//! | `i8`..`i128`, `u8`..`u128`, sizes  | `integer`      |
//! | `f32`, `f64`                       | `number`       |
//! | `bool`                             | `boolean`      |
//! | `Vec<scalar>`                      | `array`        |
//! | a struct declared next to `Params` | `object`       |
//!
//! One level of `Option<..>` is unwrapped first and recorded on the
//! descriptor.

use paramgen_check::{ParameterDesc, ParameterType};
use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type};

use crate::annotations::{
    description, CommentTags, TAG_ENUM, TAG_EXAMPLE, TAG_NOT_NEGATABLE, TAG_NO_REGEX,
    TAG_REQUIRED,
};
use crate::error::{Error, Result};
use crate::universe::{Member, RecordShape, RecordType, TypeUniverse};
use crate::utils::{apply_rename_rule, lower_case_first_letter};

/// Extract the descriptors of the universe's `Params` record.
pub fn extract_params(universe: &TypeUniverse) -> Result<Vec<ParameterDesc>> {
    let params = universe.params()?;
    Extractor {
        universe,
        visiting: Vec::new(),
    }
    .record(params)
}

struct Extractor<'a> {
    universe: &'a TypeUniverse,
    /// Records currently being expanded, to reject recursive types
    visiting: Vec<String>,
}

/// A field type with `Option` already peeled off
enum Shape<'a> {
    Scalar(ParameterType),
    Array(&'a Type),
    Record(&'a RecordType),
}

impl<'a> Extractor<'a> {
    fn record(&mut self, record: &'a RecordType) -> Result<Vec<ParameterDesc>> {
        if self.visiting.contains(&record.name) {
            return Err(Error::extract(format!(
                "recursive type {} is not supported",
                record.name
            )));
        }
        self.visiting.push(record.name.clone());

        let mut descs: Vec<ParameterDesc> = Vec::new();
        for member in &record.members {
            if member.embedded {
                return Err(Error::extract(format!(
                    "cannot handle embedded member {} in {}",
                    member.name, record.name
                )));
            }
            if member.tags.skip {
                log::debug!("Skipping {}.{} (serde skip)", record.name, member.name);
                continue;
            }

            let desc = self
                .member(record, member)
                .map_err(|e| e.in_field(&member.name))?;
            if let Some(other) = descs.iter().find(|d| d.name == desc.name) {
                return Err(Error::extract(format!(
                    "fields {} and {} of {} share the parameter name {:?}",
                    other.struct_field_name, member.name, record.name, desc.name
                )));
            }
            descs.push(desc);
        }

        self.visiting.pop();
        Ok(descs)
    }

    fn member(&mut self, record: &RecordType, member: &'a Member) -> Result<ParameterDesc> {
        let name = external_name(record, member)?;
        let (ty, is_optional) = unwrap_option(&member.ty);

        let mut desc = match self.classify(ty)? {
            Shape::Scalar(param_type) => ParameterDesc::new(name, param_type, &member.name),
            Shape::Array(elem) => {
                let mut desc = ParameterDesc::new(name, ParameterType::Array, &member.name);
                desc.array_elem_type = Some(self.array_elem_type(elem)?);
                desc
            }
            Shape::Record(nested) => {
                let mut desc = ParameterDesc::new(name, ParameterType::Object, &member.name);
                desc.sub_parameters = self.record(nested)?;
                desc
            }
        };
        desc.is_optional = is_optional;
        desc.description = description(&member.doc_lines);

        let tags = CommentTags::extract(&member.doc_lines);
        desc.examples = tags.values(TAG_EXAMPLE);
        desc.enum_values = tags.values(TAG_ENUM);
        desc.required = tags.flag(TAG_REQUIRED)?;
        desc.no_regex = tags.flag(TAG_NO_REGEX)?;
        desc.not_negatable = tags.flag(TAG_NOT_NEGATABLE)?;

        check_constraints(&desc)?;
        Ok(desc)
    }

    fn classify(&self, ty: &'a Type) -> Result<Shape<'a>> {
        let Some((ident, args)) = last_segment(ty) else {
            return Err(unsupported(ty));
        };

        if let Some(scalar) = builtin_scalar(ty) {
            return Ok(Shape::Scalar(scalar));
        }
        if ident == "Vec" {
            return single_type_arg(args).map(Shape::Array).ok_or_else(|| unsupported(ty));
        }
        if !matches!(args, PathArguments::None) {
            return Err(unsupported(ty));
        }
        match self.universe.record(&ident)? {
            Some(record) if record.shape != RecordShape::Unit && !record.has_generics => {
                Ok(Shape::Record(record))
            }
            _ => Err(unsupported(ty)),
        }
    }

    fn array_elem_type(&self, elem: &Type) -> Result<ParameterType> {
        builtin_scalar(elem).ok_or_else(|| {
            Error::extract(format!(
                "unsupported array element type {}; only string, integer, number and boolean elements are allowed",
                type_string(elem)
            ))
        })
    }
}

/// External name: serde rename, else the container's `rename_all` rule,
/// else the field name with a lower-cased first letter.
///
/// The name is also the key serde decodes the field from, so a field whose
/// lower-cased name differs from the name as written is rejected.
fn external_name(record: &RecordType, member: &Member) -> Result<String> {
    if let Some(rename) = member.tags.rename.as_ref().filter(|r| !r.is_empty()) {
        return Ok(rename.clone());
    }
    match &record.rename_all {
        Some(rule) => apply_rename_rule(rule, &member.unraw_name).ok_or_else(|| {
            Error::annotation(format!(
                "unsupported rename_all rule {:?} on {}",
                rule, record.name
            ))
        }),
        None => {
            let name = lower_case_first_letter(&member.unraw_name);
            if name != member.unraw_name {
                return Err(Error::extract(format!(
                    "field {} of {} would be exposed as parameter {:?} but serde decodes it from {:?}; \
                     add #[serde(rename = \"...\")] to choose its name",
                    member.name, record.name, name, member.unraw_name
                )));
            }
            Ok(name)
        }
    }
}

fn check_constraints(desc: &ParameterDesc) -> Result<()> {
    let has_enum = !desc.enum_values.is_empty();
    if desc.param_type == ParameterType::Object && (desc.required || has_enum) {
        return Err(Error::extract(format!(
            "required and enum are not supported on object parameter {}",
            desc.name
        )));
    }
    if desc.required && desc.param_type != ParameterType::String {
        return Err(Error::extract(format!(
            "required is only supported for string parameters, but {} is {}",
            desc.name, desc.param_type
        )));
    }
    if has_enum && desc.param_type != ParameterType::String {
        return Err(Error::extract(format!(
            "enum is only supported for string parameters, but {} is {}",
            desc.name, desc.param_type
        )));
    }
    Ok(())
}

/// Peel one `Option<..>`, reporting whether it was there
fn unwrap_option(ty: &Type) -> (&Type, bool) {
    match last_segment(ty) {
        Some((ident, args)) if ident == "Option" => match single_type_arg(args) {
            Some(inner) => (inner, true),
            None => (ty, false),
        },
        _ => (ty, false),
    }
}

fn builtin_scalar(ty: &Type) -> Option<ParameterType> {
    let (ident, args) = last_segment(ty)?;
    if !matches!(args, PathArguments::None) {
        return None;
    }
    match ident.as_str() {
        "String" => Some(ParameterType::String),
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => Some(ParameterType::Integer),
        "f32" | "f64" => Some(ParameterType::Number),
        "bool" => Some(ParameterType::Boolean),
        _ => None,
    }
}

/// Name and generic arguments of the last segment of a plain path type
fn last_segment(ty: &Type) -> Option<(String, &PathArguments)> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .map(|seg| (seg.ident.to_string(), &seg.arguments)),
        _ => None,
    }
}

fn single_type_arg(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(generic) = args else {
        return None;
    };
    let mut args = generic.args.iter();
    match (args.next(), args.next()) {
        (Some(GenericArgument::Type(inner)), None) => Some(inner),
        _ => None,
    }
}

fn unsupported(ty: &Type) -> Error {
    Error::extract(format!("currently unsupported type {}", type_string(ty)))
}

fn type_string(ty: &Type) -> String {
    ty.to_token_stream().to_string()
}
