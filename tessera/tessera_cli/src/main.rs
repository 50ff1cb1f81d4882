use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod integration;

use commands::catalog::{execute_catalog, CatalogArgs};
use commands::render::{execute_render, RenderArgs};
use commands::resolve::{execute_resolve, ResolveArgs};

/// Tessera Command Line Interface
///
/// Resolves and renders components from a components directory. Logs go to
/// stderr and are filtered with RUST_LOG.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a component reference and print its descriptor
    Resolve(ResolveArgs),

    /// Render a component instance and print its payload
    Render(RenderArgs),

    /// List the catalogued components
    Catalog(CatalogArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Resolve(args) => execute_resolve(args).await,
        Commands::Render(args) => execute_render(args).await,
        Commands::Catalog(args) => execute_catalog(args).await,
    }
}
