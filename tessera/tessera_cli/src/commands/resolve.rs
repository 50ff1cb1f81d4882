//! Resolve command
//!
//! Resolves one component reference the way a template directive would and
//! prints the resulting descriptor.

use anyhow::{bail, Result};
use clap::Args;
use tracing::warn;

use tessera_core::{ComponentDescriptor, ComponentIdentity, ComponentReference, InstanceId};
use tessera_runtime::context::RenderContext;

use crate::integration::{load_runtime, load_session};

/// Arguments for the resolve command
#[derive(Args)]
pub struct ResolveArgs {
    /// Components directory
    #[clap(long)]
    pub components: String,

    /// Runtime configuration file
    #[clap(long)]
    pub config: Option<String>,

    /// Host component the reference defaults to, as id@version
    #[clap(long)]
    pub host: Option<String>,

    /// Component name
    #[clap(long)]
    pub name: Option<String>,

    /// Component version
    #[clap(long)]
    pub version: Option<String>,

    /// View name
    #[clap(long)]
    pub view: Option<String>,

    /// Session JSON file
    #[clap(long)]
    pub session: Option<String>,
}

/// Parse a host given as `id@version`.
pub fn parse_host(host: &str) -> Result<ComponentIdentity> {
    match host.split_once('@') {
        Some((id, version)) if !id.is_empty() && !version.is_empty() => {
            Ok(ComponentIdentity::new(id, version))
        }
        _ => bail!("Host must be given as id@version, got '{}'", host),
    }
}

/// Implementation of the resolve command
pub async fn execute_resolve(args: &ResolveArgs) -> Result<()> {
    let host = args.host.as_deref().map(parse_host).transpose()?;
    let runtime = load_runtime(&args.components, args.config.as_deref()).await?;
    let session = load_session(args.session.as_deref()).await?;

    let reference =
        ComponentReference::from_parts(args.name.clone(), args.version.clone(), args.view.clone());

    let descriptor = match host {
        Some(host) => {
            let mut ctx = RenderContext::new(host, session);
            runtime.resolver().resolve(&reference, &mut ctx)
        }
        None => {
            let instance_id = InstanceId::new();
            match runtime
                .resolver()
                .lookup(&reference, None, session.as_ref(), instance_id)
            {
                Ok(resolution) => resolution.descriptor,
                Err(err) => {
                    warn!("Resolution of {} failed: {}", reference, err);
                    ComponentDescriptor::error(err.status_code(), instance_id)
                }
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host() {
        let host = parse_host("example@0.0.1").unwrap();
        assert_eq!(host, ComponentIdentity::new("example", "0.0.1"));

        assert!(parse_host("example").is_err());
        assert!(parse_host("@1.0").is_err());
        assert!(parse_host("example@").is_err());
    }
}
