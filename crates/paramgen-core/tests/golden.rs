//! The committed fixture modules match what the generator renders for them.

use std::path::{Path, PathBuf};

use paramgen_core::{extract_params, load_params, Config, GenerateMode, RenderContext, Renderer};

fn fixture_params_dir() -> PathBuf {
    fixture_check_params_dir("env")
}

fn fixture_check_params_dir(check: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/checks")
        .join(check)
        .join("internal/params")
}

#[tokio::test]
async fn test_fixture_matches_rendered_module() -> paramgen_core::Result<()> {
    for check in ["env", "owner"] {
        assert_fixture_up_to_date(&fixture_check_params_dir(check)).await?;
    }
    Ok(())
}

async fn assert_fixture_up_to_date(dir: &Path) -> paramgen_core::Result<()> {
    let loaded = load_params(dir, "param_codegen").await?;
    assert_eq!(loaded.params_path, "super::Params");

    let descs = extract_params(&loaded.universe)?;
    let ctx = RenderContext::prepare(&descs, loaded.params_path, "param_codegen")?;
    let rendered = Renderer::new()?.render(&ctx)?;

    let committed = tokio::fs::read_to_string(dir.join("gen_params.rs")).await?;
    let rendered_file = syn::parse_file(&rendered).expect("rendered module parses");
    let committed_file = syn::parse_file(&committed).expect("committed module parses");
    assert!(
        rendered_file == committed_file,
        "fixture {} is out of date; rendered:\n{rendered}",
        dir.display()
    );
    Ok(())
}

#[tokio::test]
async fn test_regenerating_a_copy_is_stable() -> paramgen_core::Result<()> {
    let root = tempfile::tempdir()?;
    let params_dir = root.path().join("env/internal/params");
    tokio::fs::create_dir_all(&params_dir).await?;
    tokio::fs::copy(fixture_params_dir().join("mod.rs"), params_dir.join("mod.rs")).await?;
    // a stale generated file must not influence loading
    tokio::fs::copy(
        fixture_params_dir().join("gen_params.rs"),
        params_dir.join("gen_params.rs"),
    )
    .await?;

    let config = Config::new(root.path().to_string_lossy());
    let renderer = Renderer::new()?;
    paramgen_core::generate_all(&config, &renderer, GenerateMode::Write).await?;
    let first = tokio::fs::read_to_string(params_dir.join("gen_params.rs")).await?;

    paramgen_core::generate_all(&config, &renderer, GenerateMode::Write).await?;
    let second = tokio::fs::read_to_string(params_dir.join("gen_params.rs")).await?;
    assert_eq!(first, second);

    paramgen_core::generate_all(&config, &renderer, GenerateMode::Check).await?;
    Ok(())
}
