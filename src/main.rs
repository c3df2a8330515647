use anyhow::{Context, Result};
use clap::Parser;
use ocindex::{
    assemble::{assemble, render, AssembleOptions},
    cli::{Cli, Commands},
    config::Config,
    registry::RegistryClient,
    source,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr; stdout carries the index document
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Remote {
            base,
            platform,
            kind,
            sort,
            output,
        } => {
            let config = Config::load()?;
            let platforms = platform.unwrap_or(config.platforms);
            let kinds = kind.unwrap_or(config.kinds);

            let targets = source::expand_targets(&platforms, &kinds)?;
            let client = RegistryClient::new();
            let sources = source::resolve_remote(&client, &base, &targets).await?;

            let options = AssembleOptions {
                sort_output: sort,
                always_emit_platform: true,
            };
            let index = assemble(&sources, &options)?;
            info!("Assembled index with {} manifests", index.manifests.len());

            emit(&render(&index, &options)?, output.as_ref())?;
        }
        Commands::Local {
            manifests,
            no_sort,
            output,
        } => {
            let sources = source::resolve_local(&manifests)?;

            let options = AssembleOptions {
                sort_output: !no_sort,
                always_emit_platform: false,
            };
            let index = assemble(&sources, &options)?;
            info!("Assembled index with {} manifests", index.manifests.len());

            emit(&render(&index, &options)?, output.as_ref())?;
        }
        Commands::Version => {
            println!("ocindex {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn emit(document: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, document)
            .with_context(|| format!("Failed to write index to {}", path.display()))?,
        None => println!("{}", document),
    }
    Ok(())
}
