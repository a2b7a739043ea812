//! Metadata annotations embedded in doc comments.
//!
//! A doc line starting with [`METADATA_MARKER`] is an annotation rather than
//! description text:
//!
//! ```text
//! /// The environment this check applies to.
//! /// +required
//! /// +enum=dev
//! /// +enum=prod
//! /// +example=dev
//! ```
//!
//! Each annotation is a key with an optional `=value`. Keys may repeat; every
//! occurrence contributes one value, in order.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Prefix marking a doc line as an annotation
pub const METADATA_MARKER: char = '+';

pub const TAG_REQUIRED: &str = "required";
pub const TAG_NO_REGEX: &str = "noregex";
pub const TAG_NOT_NEGATABLE: &str = "notnegatable";
pub const TAG_ENUM: &str = "enum";
pub const TAG_EXAMPLE: &str = "example";

const KNOWN_TAGS: &[&str] = &[
    TAG_REQUIRED,
    TAG_NO_REGEX,
    TAG_NOT_NEGATABLE,
    TAG_ENUM,
    TAG_EXAMPLE,
];

fn is_annotation(line: &str) -> bool {
    line.trim_start().starts_with(METADATA_MARKER)
}

/// Description text: the doc lines before the first annotation, joined with
/// single spaces.
pub fn description(doc_lines: &[String]) -> String {
    doc_lines
        .iter()
        .take_while(|line| !is_annotation(line))
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Annotation values keyed by tag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTags {
    tags: BTreeMap<String, Vec<String>>,
}

impl CommentTags {
    /// Collect every annotation in `doc_lines`.
    pub fn extract(doc_lines: &[String]) -> Self {
        let mut tags: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for line in doc_lines.iter().map(|l| l.trim()).filter(|l| is_annotation(l)) {
            let body = &line[METADATA_MARKER.len_utf8()..];
            let (key, value) = body.split_once('=').unwrap_or((body, ""));
            tags.entry(key.trim().to_string())
                .or_default()
                .push(value.trim().to_string());
        }
        for key in tags.keys().filter(|k| !KNOWN_TAGS.contains(&k.as_str())) {
            log::debug!("Ignoring unrecognized annotation +{}", key);
        }
        Self { tags }
    }

    /// All values of a repeatable tag, in declaration order.
    pub fn values(&self, key: &str) -> Vec<String> {
        self.tags.get(key).cloned().unwrap_or_default()
    }

    /// Presence of a bare flag tag.
    ///
    /// Flags take no value; `+required=true` is rejected rather than
    /// silently interpreted.
    pub fn flag(&self, key: &str) -> Result<bool> {
        match self.tags.get(key) {
            None => Ok(false),
            Some(values) if values.iter().all(String::is_empty) => Ok(true),
            Some(values) => Err(Error::annotation(format!(
                "invalid value for tag {}: {:?}; tag is only supported WITHOUT values",
                key, values
            ))),
        }
    }
}
