//! Loading the type declarations of a params directory.
//!
//! Every `*.rs` file directly inside the directory is parsed with `syn`.
//! Files and items are selected the way the compiler would select them with
//! the build tag enabled: a file carrying `#![cfg(not(param_codegen))]` (as
//! every generated module does) is skipped, so the generator never reads its
//! own output.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//!
//! use paramgen_core::universe::TypeUniverse;
//!
//! let mut universe = TypeUniverse::default();
//! let src = "pub struct Params { pub env: String }";
//! universe
//!     .add_source("mod", Path::new("mod.rs"), src, "param_codegen")
//!     .unwrap();
//! let params = universe.params().unwrap();
//! assert_eq!(params.members.len(), 1);
//! ```

// Internal imports (std, crate)
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

// External imports (alphabetized)
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Fields, Item, Lit, LitStr, Meta, Token};
use tokio::fs;

/// Name of the record type every params directory must declare
pub const PARAMS_TYPE_NAME: &str = "Params";

/// All type declarations found in one params directory.
#[derive(Debug, Default)]
pub struct TypeUniverse {
    decls: BTreeMap<String, Vec<TypeDecl>>,
    modules: Vec<String>,
}

/// A named type declaration and the module (file stem) declaring it.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub module: String,
    pub kind: TypeDeclKind,
}

#[derive(Debug, Clone)]
pub enum TypeDeclKind {
    Record(RecordType),
    Enum,
    Alias,
    Union,
}

/// How a struct declares its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Named,
    Tuple,
    Unit,
}

/// A struct declaration with its member metadata.
#[derive(Debug, Clone)]
pub struct RecordType {
    pub name: String,
    pub shape: RecordShape,
    pub has_generics: bool,
    /// Container-level `#[serde(rename_all = "...")]`
    pub rename_all: Option<String>,
    pub members: Vec<Member>,
}

/// One field of a record.
#[derive(Debug, Clone)]
pub struct Member {
    /// Identifier as written (keeps `r#`), or the position of a tuple field
    pub name: String,
    /// Identifier without the raw prefix
    pub unraw_name: String,
    pub ty: syn::Type,
    pub doc_lines: Vec<String>,
    pub tags: MemberTags,
    /// Tuple fields and `#[serde(flatten)]` fields include another type
    /// instead of naming a parameter
    pub embedded: bool,
}

/// Serde attributes relevant to parameter extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberTags {
    pub rename: Option<String>,
    pub flatten: bool,
    pub skip: bool,
}

/// A resolved `Params` type and everything needed to generate its module.
#[derive(Debug)]
pub struct LoadedParams {
    pub universe: TypeUniverse,
    /// Path of `Params` as seen from the generated module
    pub params_path: String,
}

/// Load every selected source file in `dir` and resolve `Params`.
pub async fn load_params(dir: &Path, build_tag: &str) -> Result<LoadedParams> {
    let mut sources = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "rs") && entry.file_type().await?.is_file()
        {
            sources.push(path);
        }
    }
    sources.sort();

    let mut universe = TypeUniverse::default();
    for path in &sources {
        let module = module_name(path)?;
        let src = fs::read_to_string(path).await?;
        if universe.add_source(&module, path, &src, build_tag)? {
            log::debug!("Loaded {}", path.display());
        } else {
            log::debug!("Skipped {} (excluded under cfg {})", path.display(), build_tag);
        }
    }

    if universe.modules.is_empty() {
        return Err(Error::load(format!(
            "found unexpected number of packages in {}: 0",
            dir.display()
        )));
    }

    let params_path = universe.params_path()?;
    Ok(LoadedParams {
        universe,
        params_path,
    })
}

impl TypeUniverse {
    /// Parse one source file into the universe.
    ///
    /// Returns `false` when the file is excluded under `build_tag`.
    pub fn add_source(
        &mut self,
        module: &str,
        path: &Path,
        src: &str,
        build_tag: &str,
    ) -> Result<bool> {
        let parse_err = |source: syn::Error| Error::Parse {
            path: PathBuf::from(path),
            source,
        };
        let file = syn::parse_file(src).map_err(parse_err)?;
        if !cfg_enabled(&file.attrs, build_tag).map_err(parse_err)? {
            return Ok(false);
        }

        for item in &file.items {
            let (attrs, name, kind) = match item {
                Item::Struct(s) => (
                    &s.attrs,
                    s.ident.to_string(),
                    TypeDeclKind::Record(record_type(s).map_err(parse_err)?),
                ),
                Item::Enum(e) => (&e.attrs, e.ident.to_string(), TypeDeclKind::Enum),
                Item::Type(t) => (&t.attrs, t.ident.to_string(), TypeDeclKind::Alias),
                Item::Union(u) => (&u.attrs, u.ident.to_string(), TypeDeclKind::Union),
                _ => continue,
            };
            if !cfg_enabled(attrs, build_tag).map_err(parse_err)? {
                continue;
            }
            self.decls.entry(name.clone()).or_default().push(TypeDecl {
                name,
                module: module.to_string(),
                kind,
            });
        }
        self.modules.push(module.to_string());
        Ok(true)
    }

    /// The unique `Params` record.
    pub fn params(&self) -> Result<&RecordType> {
        let decl = self.params_decl()?;
        match &decl.kind {
            TypeDeclKind::Record(record)
                if record.shape != RecordShape::Unit && !record.has_generics =>
            {
                Ok(record)
            }
            other => Err(Error::load(format!(
                "unexpected param type: {} is declared as {}",
                PARAMS_TYPE_NAME,
                describe_kind(other)
            ))),
        }
    }

    /// Look up a record by name for nested parameters.
    ///
    /// `Ok(None)` means the name is unknown or not a struct.
    pub fn record(&self, name: &str) -> Result<Option<&RecordType>> {
        match self.decls.get(name).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([decl]) => match &decl.kind {
                TypeDeclKind::Record(record) => Ok(Some(record)),
                _ => Ok(None),
            },
            Some(decls) => Err(Error::extract(format!(
                "type {} is declared {} times",
                name,
                decls.len()
            ))),
        }
    }

    fn params_decl(&self) -> Result<&TypeDecl> {
        match self.decls.get(PARAMS_TYPE_NAME).map(Vec::as_slice) {
            None | Some([]) => Err(Error::load(format!(
                "{} not found",
                PARAMS_TYPE_NAME
            ))),
            Some([decl]) => Ok(decl),
            Some(decls) => Err(Error::load(format!(
                "found unexpected number of modules declaring {}: {}",
                PARAMS_TYPE_NAME,
                decls.len()
            ))),
        }
    }

    fn params_path(&self) -> Result<String> {
        self.params()?;
        let module = &self.params_decl()?.module;
        Ok(match module.as_str() {
            "mod" | "lib" => format!("super::{}", PARAMS_TYPE_NAME),
            other => format!("super::{}::{}", other, PARAMS_TYPE_NAME),
        })
    }
}

fn describe_kind(kind: &TypeDeclKind) -> &'static str {
    match kind {
        TypeDeclKind::Record(record) if record.has_generics => "a generic struct",
        TypeDeclKind::Record(_) => "a unit struct",
        TypeDeclKind::Enum => "an enum",
        TypeDeclKind::Alias => "a type alias",
        TypeDeclKind::Union => "a union",
    }
}

fn module_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(String::from)
        .ok_or_else(|| Error::load(format!("invalid source file name: {}", path.display())))
}

fn record_type(item: &syn::ItemStruct) -> syn::Result<RecordType> {
    let shape = match &item.fields {
        Fields::Named(_) => RecordShape::Named,
        Fields::Unnamed(_) => RecordShape::Tuple,
        Fields::Unit => RecordShape::Unit,
    };

    let mut members = Vec::new();
    for (i, field) in item.fields.iter().enumerate() {
        let tags = member_tags(&field.attrs)?;
        let (name, unraw_name) = match &field.ident {
            Some(ident) => (ident.to_string(), ident.unraw().to_string()),
            None => (i.to_string(), i.to_string()),
        };
        members.push(Member {
            name,
            unraw_name,
            ty: field.ty.clone(),
            doc_lines: doc_lines(&field.attrs),
            embedded: field.ident.is_none() || tags.flatten,
            tags,
        });
    }

    Ok(RecordType {
        name: item.ident.to_string(),
        shape,
        has_generics: !item.generics.params.is_empty(),
        rename_all: container_rename_all(&item.attrs)?,
        members,
    })
}

/// The lines of all `///` and `#[doc = "..."]` attributes, in order
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .flat_map(|doc| doc.lines().map(String::from).collect::<Vec<_>>())
        .collect()
}

fn member_tags(attrs: &[Attribute]) -> syn::Result<MemberTags> {
    let mut tags = MemberTags::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(name) = deserialize_name(&meta)? {
                    tags.rename = Some(name);
                }
            } else if meta.path.is_ident("flatten") {
                tags.flatten = true;
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
                tags.skip = true;
            } else {
                skip_meta_value(&meta)?;
            }
            Ok(())
        })?;
    }
    Ok(tags)
}

fn container_rename_all(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename_all = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(rule) = deserialize_name(&meta)? {
                    rename_all = Some(rule);
                }
            } else {
                skip_meta_value(&meta)?;
            }
            Ok(())
        })?;
    }
    Ok(rename_all)
}

/// Value of `key = "..."` or the `deserialize` half of
/// `key(serialize = "...", deserialize = "...")`
fn deserialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(Token![=]) {
        let name: LitStr = meta.value()?.parse()?;
        return Ok(Some(name.value()));
    }
    let mut name = None;
    meta.parse_nested_meta(|inner| {
        let value: LitStr = inner.value()?.parse()?;
        if inner.path.is_ident("deserialize") {
            name = Some(value.value());
        }
        Ok(())
    })?;
    Ok(name)
}

/// Consume the value of a serde option we do not interpret
fn skip_meta_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: proc_macro2::TokenStream = content.parse()?;
    }
    Ok(())
}

/// Whether every `cfg` attribute in `attrs` holds with only `build_tag` set.
pub fn cfg_enabled(attrs: &[Attribute], build_tag: &str) -> syn::Result<bool> {
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("cfg")) {
        let predicate: Meta = attr.parse_args()?;
        if !eval_cfg(&predicate, build_tag)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn eval_cfg(predicate: &Meta, build_tag: &str) -> syn::Result<bool> {
    match predicate {
        Meta::Path(path) => Ok(path.is_ident(build_tag)),
        // `feature = "..."` and friends are never set while generating
        Meta::NameValue(_) => Ok(false),
        Meta::List(list) => {
            let args = list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            let mut results = args.iter().map(|arg| eval_cfg(arg, build_tag));
            if list.path.is_ident("not") {
                if args.len() != 1 {
                    return Err(syn::Error::new_spanned(list, "not() takes one predicate"));
                }
                Ok(!eval_cfg(&args[0], build_tag)?)
            } else if list.path.is_ident("all") {
                results.try_fold(true, |acc, r| r.map(|v| acc && v))
            } else if list.path.is_ident("any") {
                results.try_fold(false, |acc, r| r.map(|v| acc || v))
            } else {
                Err(syn::Error::new_spanned(&list.path, "unknown cfg predicate"))
            }
        }
    }
}
