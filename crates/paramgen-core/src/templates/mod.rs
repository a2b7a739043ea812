//! Template system for the generated parameter module
//!
//! Rendering happens in two phases. [`RenderContext::prepare`] turns the
//! descriptor list into plain substitution data, then [`Renderer::render`]
//! feeds that data through the Tera template.

mod context;
mod renderer;

pub use context::{RenderContext, TemplateElem};
pub use renderer::{Renderer, TEMPLATE_NAME};
