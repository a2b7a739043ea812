//! Rendering of the generated parameter module

// Internal imports (std, crate)
use std::{collections::HashMap, path::Path, sync::Arc};

use crate::{
    config::Config,
    error::{Error, Result},
    utils::{to_raw_string_literal, to_string_literal},
};

use super::RenderContext;

// External imports (alphabetized)
use tera::{Context, Tera, Value};

/// Name the module template is registered under
pub const TEMPLATE_NAME: &str = "gen_params.rs";

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/gen_params.rs.tera");

/// Renders a [`RenderContext`] into Rust source
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Tera instance holding the single module template
    tera: Arc<Tera>,
}

impl Renderer {
    /// Renderer for the built-in template
    pub fn new() -> Result<Self> {
        Self::from_template_str(BUILTIN_TEMPLATE)
    }

    /// Renderer for a template given as text
    pub fn from_template_str(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.register_filter("raw_string", raw_string_filter);
        tera.register_filter("rust_str", rust_str_filter);
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(|e| Error::template(format!("Failed to parse module template: {}", e)))?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Renderer for a template file on disk
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading module template from {}", path.display());
        let source = tokio::fs::read_to_string(path).await?;
        Self::from_template_str(&source)
    }

    /// Renderer selected by `config.template_path`, falling back to the
    /// built-in template
    pub async fn from_config(config: &Config) -> Result<Self> {
        match &config.template_path {
            Some(path) => Self::from_file(path).await,
            None => Self::new(),
        }
    }

    /// Render the full module text.
    pub fn render(&self, ctx: &RenderContext) -> Result<String> {
        let context = Context::from_serialize(ctx)?;
        self.tera.render(TEMPLATE_NAME, &context).map_err(|e| {
            log::error!("Template rendering failed for '{}': {}", TEMPLATE_NAME, e);
            Error::template(format!("Failed to render template '{}': {}", TEMPLATE_NAME, e))
        })
    }
}

/// `{{ text | raw_string }}` renders `text` as a Rust raw string literal
fn raw_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = tera::try_get_value!("raw_string", "value", String, value);
    Ok(Value::String(to_raw_string_literal(&text)))
}

/// `{{ text | rust_str }}` renders `text` as an escaped Rust string literal
fn rust_str_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = tera::try_get_value!("rust_str", "value", String, value);
    Ok(Value::String(to_string_literal(&text)))
}
