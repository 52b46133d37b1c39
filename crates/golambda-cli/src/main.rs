mod commands;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "golambda",
    about = "Package a Go function file as an AWS Lambda zip archive"
)]
#[command(version)]
struct Cli {
    /// Go file exporting `func Handler(http.ResponseWriter, *http.Request)`
    #[arg(long, value_name = "FILE")]
    source: String,
    /// Zip archive to produce
    #[arg(long, visible_alias = "destination", value_name = "ZIP")]
    output: String,
    /// Config file to use instead of ./golambda.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    commands::package(&cli.source, &cli.output, cli.config.as_deref()).await
}
