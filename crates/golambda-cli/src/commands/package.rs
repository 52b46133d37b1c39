use anyhow::Context;
use golambda_build::Packager;
use golambda_core::{BuildRequest, GolambdaConfig};
use std::path::Path;

/// Build `source` and write the deployable archive to `output`.
pub async fn package(source: &str, output: &str, config_path: Option<&Path>) -> anyhow::Result<()> {
    let working_dir = std::env::current_dir().context("failed to resolve working directory")?;

    let config = match config_path {
        Some(path) => GolambdaConfig::load_file(&working_dir.join(path), true)?,
        None => GolambdaConfig::load(&working_dir)?,
    };
    let request = BuildRequest::new(working_dir, source, output, config)?;

    let outcome = Packager::new().package(&request).await?;
    for step in &outcome.steps {
        tracing::debug!("{step}");
    }

    println!("Produced package: {output}");
    Ok(())
}
