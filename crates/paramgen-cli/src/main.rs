//! paramgen CLI entrypoint
//! Parses command-line arguments and runs the generator over every check
//! directory below the root.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use paramgen_core::{generate_all, Config, GenerateMode, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "paramgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory whose subdirectories hold the checks (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,
    /// Configuration file (YAML, or TOML with a .toml extension)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fail if any generated file is missing or out of date instead of writing
    #[arg(long)]
    check: bool,
}

impl Cli {
    async fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .await
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(root) = &self.root {
            config.root_dir = root.to_string_lossy().into_owned();
        }
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let config = cli.load_config().await?;
    let mode = if cli.check {
        GenerateMode::Check
    } else {
        GenerateMode::Write
    };
    tracing::debug!(?config, ?mode, "Resolved configuration");

    let renderer = Renderer::from_config(&config)
        .await
        .context("Failed to initialize template renderer")?;

    println!("Generating parameter code under: {}", config.root_dir);
    let outputs = generate_all(&config, &renderer, mode)
        .await
        .context("Error generating parameter code")?;

    for output in &outputs {
        match mode {
            GenerateMode::Write => println!("Generated {}", output.display()),
            GenerateMode::Check => println!("Up to date: {}", output.display()),
        }
    }
    println!("Processed {} check directories", outputs.len());
    Ok(())
}
