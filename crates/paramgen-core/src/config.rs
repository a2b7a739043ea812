//! Configuration management for paramgen code generation.
//!
//! This module defines the `Config` struct that controls where the generator
//! looks for parameter types and where it writes the generated modules. The
//! configuration can be created programmatically with defaults or loaded from
//! a YAML or TOML file.
//!
//! # Examples
//!
//! ```no_run
//! use paramgen_core::config::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> paramgen_core::Result<()> {
//! // Create a new config programmatically
//! let mut config = Config::new("checks");
//! config.skip_dirs.push("testdata".to_string());
//!
//! // Or load from a config file
//! let config = Config::from_file("paramgen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::error::Error;

// External imports (alphabetized)
use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tokio::fs;

/// Configuration for a paramgen run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory whose immediate subdirectories hold one check each
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    /// Location of the parameter sources inside each check directory
    #[serde(default = "default_params_subdir")]
    pub params_subdir: String,

    /// File name of the generated module, written next to the sources
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Subdirectories of `root_dir` that never hold parameters
    #[serde(
        default = "default_skip_dirs",
        deserialize_with = "deserialize_dirs"
    )]
    pub skip_dirs: Vec<String>,

    /// `cfg` name active while loading sources; generated files are
    /// compiled only when it is unset
    #[serde(default = "default_build_tag")]
    pub build_tag: String,

    /// Optional path to a template replacing the built-in one
    #[serde(default)]
    pub template_path: Option<String>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(root_dir: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            params_subdir: default_params_subdir(),
            output_file: default_output_file(),
            skip_dirs: default_skip_dirs(),
            build_tag: default_build_tag(),
            template_path: None,
        }
    }

    /// Load configuration from a file (TOML for `.toml`, YAML otherwise)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = if is_toml(path) {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = if is_toml(path) {
            toml::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content).await?;
        Ok(())
    }

    /// The params directory of one check directory
    pub fn params_dir(&self, check_dir: &Path) -> PathBuf {
        check_dir.join(&self.params_subdir)
    }

    /// Whether a subdirectory of `root_dir` is excluded from generation
    pub fn is_skipped(&self, dir_name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == dir_name)
    }

    /// Reject settings the generator cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.params_subdir.is_empty() {
            return Err(Error::config("params_subdir must not be empty"));
        }
        let output = Path::new(&self.output_file);
        if output.extension().map_or(true, |ext| ext != "rs")
            || output.components().count() != 1
        {
            return Err(Error::config(format!(
                "output_file must be a plain .rs file name, got {:?}",
                self.output_file
            )));
        }
        if syn::parse_str::<syn::Ident>(&self.build_tag).is_err() {
            return Err(Error::config(format!(
                "build_tag must be a valid cfg name, got {:?}",
                self.build_tag
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_root_dir())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "toml")
}

fn default_root_dir() -> String {
    ".".to_string()
}

fn default_params_subdir() -> String {
    "internal/params".to_string()
}

fn default_output_file() -> String {
    "gen_params.rs".to_string()
}

fn default_skip_dirs() -> Vec<String> {
    ["all", "codegen", "util"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_build_tag() -> String {
    "param_codegen".to_string()
}

/// Helper function to deserialize either a single directory or a list of directories
fn deserialize_dirs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => seq
            .into_iter()
            .map(|item| match item {
                SerdeValue::String(s) => Ok(s),
                _ => Err(serde::de::Error::custom(
                    "Expected string or array of strings",
                )),
            })
            .collect(),
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}
