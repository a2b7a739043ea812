//! Paramgen Core Library
//!
//! This library generates parameter descriptors and validation code for
//! checks whose configuration is declared as an annotated `Params` struct.
//!
//! For every check directory the pipeline runs once: load the Rust sources
//! of its params module, extract a [`paramgen_check::ParameterDesc`] per
//! field, serialize the descriptors, and render `gen_params.rs` next to the
//! sources.

pub mod annotations;
pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod serialize;
pub mod templates;
pub mod universe;
pub mod utils;

pub use crate::{
    config::Config,
    error::{Error, Result},
    extract::extract_params,
    generate::{generate_all, process_dir, GenerateMode},
    templates::{RenderContext, Renderer},
    universe::load_params,
};
