//! Render command
//!
//! Renders one component instance the way the server answers a client
//! render request and prints the payload.

use anyhow::Result;
use clap::Args;

use tessera_core::{InstanceId, RenderRequest};

use crate::integration::{load_runtime, load_session};

/// Arguments for the render command
#[derive(Args)]
pub struct RenderArgs {
    /// Components directory
    #[clap(long)]
    pub components: String,

    /// Runtime configuration file
    #[clap(long)]
    pub config: Option<String>,

    /// Component id
    #[clap(long)]
    pub id: String,

    /// Component version, latest when omitted
    #[clap(long)]
    pub version: Option<String>,

    /// View name
    #[clap(long, default_value = "index")]
    pub view: String,

    /// Instance id to render into, fresh when omitted
    #[clap(long)]
    pub instance_id: Option<InstanceId>,

    /// Session JSON file
    #[clap(long)]
    pub session: Option<String>,
}

/// Implementation of the render command
pub async fn execute_render(args: &RenderArgs) -> Result<()> {
    let runtime = load_runtime(&args.components, args.config.as_deref()).await?;
    let session = load_session(args.session.as_deref()).await?;

    let request = RenderRequest {
        id: Some(args.id.clone()),
        version: args.version.clone(),
        view: Some(args.view.clone()),
        instance_id: Some(args.instance_id.unwrap_or_else(InstanceId::new)),
        placeholder: false,
    };
    let payload = runtime.service().handle(&request, session.as_ref());

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
