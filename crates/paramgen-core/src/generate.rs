//! Code generation driver

use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    error::{Error, Result},
    extract::extract_params,
    templates::{RenderContext, Renderer},
    universe::load_params,
};

/// What to do with a rendered module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerateMode {
    /// Write the module to disk
    #[default]
    Write,
    /// Compare the module with the file on disk and fail on any difference
    Check,
}

/// Main entry point for code generation.
///
/// Processes every immediate subdirectory of `config.root_dir` in name order,
/// stopping at the first failure. Returns the paths of the generated (or
/// checked) files.
pub async fn generate_all(
    config: &Config,
    renderer: &Renderer,
    mode: GenerateMode,
) -> Result<Vec<PathBuf>> {
    config.validate()?;
    let root = Path::new(&config.root_dir);
    let mut dirs = Vec::new();
    let mut entries = tokio::fs::read_dir(root).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if config.is_skipped(&name) {
            log::debug!("Skipping {}", name);
            continue;
        }
        dirs.push(entry.path());
    }
    dirs.sort();

    let mut outputs = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let output = process_dir(&dir, config, renderer, mode)
            .await
            .map_err(|e| e.in_dir(&dir))?;
        outputs.push(output);
    }
    Ok(outputs)
}

/// Generate (or check) the parameter module of one check directory.
pub async fn process_dir(
    check_dir: &Path,
    config: &Config,
    renderer: &Renderer,
    mode: GenerateMode,
) -> Result<PathBuf> {
    let params_dir = config.params_dir(check_dir);
    let loaded = load_params(&params_dir, &config.build_tag).await?;
    let descs = extract_params(&loaded.universe)?;
    log::debug!(
        "Extracted {} parameters from {}",
        descs.len(),
        params_dir.display()
    );

    let ctx = RenderContext::prepare(&descs, loaded.params_path, config.build_tag.clone())?;
    let rendered = renderer.render(&ctx)?;
    let output_path = params_dir.join(&config.output_file);

    match mode {
        GenerateMode::Write => {
            tokio::fs::write(&output_path, rendered).await?;
            log::info!("Wrote {}", output_path.display());
        }
        GenerateMode::Check => {
            let existing = match tokio::fs::read_to_string(&output_path).await {
                Ok(existing) => Some(existing),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            };
            if existing.as_deref() != Some(rendered.as_str()) {
                return Err(Error::template(format!(
                    "generated file {} is out of date",
                    output_path.display()
                )));
            }
            log::info!("{} is up to date", output_path.display());
        }
    }
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS_SRC: &str = r#"
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// Namespaces to inspect.
    /// +required
    pub namespace: String,
    pub max_replicas: i32,
}
"#;

    async fn write_check(root: &Path, name: &str, src: &str) -> Result<PathBuf> {
        let params_dir = root.join(name).join("internal/params");
        tokio::fs::create_dir_all(&params_dir).await?;
        tokio::fs::write(params_dir.join("mod.rs"), src).await?;
        Ok(params_dir)
    }

    #[tokio::test]
    async fn test_generate_all_writes_and_checks() -> Result<()> {
        let root = tempfile::tempdir()?;
        let a = write_check(root.path(), "replicas", PARAMS_SRC).await?;
        let b = write_check(root.path(), "namespaces", PARAMS_SRC).await?;
        // skipped by default
        write_check(root.path(), "util", "pub struct Params(String);").await?;
        tokio::fs::write(root.path().join("README.md"), "not a dir").await?;

        let config = Config::new(root.path().to_string_lossy());
        let renderer = Renderer::new()?;

        let outputs = generate_all(&config, &renderer, GenerateMode::Write).await?;
        assert_eq!(outputs, vec![b.join("gen_params.rs"), a.join("gen_params.rs")]);

        let generated = tokio::fs::read_to_string(a.join("gen_params.rs")).await?;
        assert!(generated.contains("pub static NAMESPACE_PARAM_DESC"));
        assert!(generated.contains("\"name\": \"maxReplicas\""));
        assert!(generated.contains("use super::Params;"));

        // the generated file is invisible to the next run
        generate_all(&config, &renderer, GenerateMode::Check).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_check_mode_detects_stale_output() -> Result<()> {
        let root = tempfile::tempdir()?;
        let params_dir = write_check(root.path(), "replicas", PARAMS_SRC).await?;
        let config = Config::new(root.path().to_string_lossy());
        let renderer = Renderer::new()?;

        let err = generate_all(&config, &renderer, GenerateMode::Check)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("is out of date"));
        assert!(!params_dir.join("gen_params.rs").exists());

        generate_all(&config, &renderer, GenerateMode::Write).await?;
        tokio::fs::write(
            params_dir.join("gen_params.rs"),
            "#![cfg(not(param_codegen))]\n// stale\n",
        )
        .await?;
        let err = generate_all(&config, &renderer, GenerateMode::Check)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("processing dir "));
        Ok(())
    }

    #[tokio::test]
    async fn test_failure_names_directory_and_writes_nothing() -> Result<()> {
        let root = tempfile::tempdir()?;
        let params_dir = write_check(
            root.path(),
            "embedded",
            r#"
            pub struct Params {
                #[serde(flatten)]
                pub common: Common,
            }
            pub struct Common { pub a: String }
            "#,
        )
        .await?;
        let config = Config::new(root.path().to_string_lossy());

        let err = generate_all(&config, &Renderer::new()?, GenerateMode::Write)
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("embedded"), "{message}");
        assert!(message.contains("cannot handle embedded member common in Params"), "{message}");
        assert!(!params_dir.join("gen_params.rs").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_params_dir_fails() -> Result<()> {
        let root = tempfile::tempdir()?;
        tokio::fs::create_dir_all(root.path().join("empty")).await?;
        let config = Config::new(root.path().to_string_lossy());

        let err = generate_all(&config, &Renderer::new()?, GenerateMode::Write)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Dir { .. }));
        Ok(())
    }
}
