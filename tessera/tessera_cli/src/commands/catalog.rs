//! Catalog command
//!
//! Lists the component versions found in a components directory.

use anyhow::Result;
use clap::Args;

use tessera_runtime::catalog::ComponentCatalog;

use crate::integration::load_runtime;

/// Arguments for the catalog command
#[derive(Args)]
pub struct CatalogArgs {
    /// Components directory
    #[clap(long)]
    pub components: String,

    /// Print the catalog as JSON
    #[clap(long)]
    pub json: bool,
}

/// Implementation of the catalog command
pub async fn execute_catalog(args: &CatalogArgs) -> Result<()> {
    let runtime = load_runtime(&args.components, None).await?;
    let components = runtime.catalog().list();

    if args.json {
        let metas: Vec<_> = components.iter().map(|meta| meta.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&metas)?);
        return Ok(());
    }

    if components.is_empty() {
        println!("No components found in {}", args.components);
        return Ok(());
    }

    for meta in components {
        let views: Vec<&str> = meta.views.keys().map(String::as_str).collect();
        println!("{} views: {}", meta.identity(), views.join(", "));
    }

    Ok(())
}
