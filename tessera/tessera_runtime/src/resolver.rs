//! Component resolver.
//!
//! The resolver turns a [`ComponentReference`] into a [`ComponentDescriptor`].
//! Resolution is total: every failure is converted into the error
//! component descriptor for its status code, so composing a page always
//! completes.
//!
//! Resolution steps, each short-circuiting on failure:
//!
//! 1. the reference must name a view, and may only carry a version together
//!    with a name (500)
//! 2. the name defaults to the host component, and then so does the version;
//!    a name without a version selects the latest version
//! 3. the component version and the view must exist (404)
//! 4. the component, then the view, must pass the authorization gate (401)

use std::sync::Arc;
use tracing::{debug, warn};

use tessera_core::error::ResolveError;
use tessera_core::{ComponentDescriptor, ComponentIdentity, ComponentReference, InstanceId, Session};
use tessera_policy::AuthorizationGate;

use crate::catalog::{ComponentCatalog, ComponentMeta};
use crate::context::RenderContext;

/// A successful resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The resolved instance.
    pub descriptor: ComponentDescriptor,

    /// Metadata of the resolved component version.
    pub component: Arc<ComponentMeta>,
}

/// Component resolver.
pub struct ComponentResolver<C> {
    /// The component catalog.
    catalog: C,

    /// The authorization gate.
    gate: AuthorizationGate,
}

impl<C> ComponentResolver<C>
where
    C: ComponentCatalog,
{
    /// Create a new resolver.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The component catalog.
    /// * `gate` - The authorization gate.
    pub fn new(catalog: C, gate: AuthorizationGate) -> Self {
        Self { catalog, gate }
    }

    /// The component catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Resolve a reference found while composing the context's host.
    ///
    /// The resulting descriptor, or the error descriptor substituted for it,
    /// is appended to the context's children. Stylesheets are merged only
    /// on success.
    pub fn resolve(
        &self,
        reference: &ComponentReference,
        ctx: &mut RenderContext,
    ) -> ComponentDescriptor {
        let instance_id = InstanceId::new();

        match self.lookup(reference, Some(ctx.component()), ctx.session(), instance_id) {
            Ok(resolution) => {
                debug!(
                    reference = %reference,
                    instance_id = %instance_id,
                    "Resolved {}",
                    resolution.component.identity()
                );
                ctx.add_css(resolution.component.css.iter().cloned());
                ctx.push_child(resolution.descriptor.clone());
                resolution.descriptor
            }
            Err(err) => self.substitute(err, instance_id, ctx),
        }
    }

    /// Append the error descriptor for a failed resolution to the context.
    pub fn substitute(
        &self,
        err: ResolveError,
        instance_id: InstanceId,
        ctx: &mut RenderContext,
    ) -> ComponentDescriptor {
        warn!(
            host = %ctx.component(),
            instance_id = %instance_id,
            status = %err.status_code(),
            "Substituting error component: {}",
            err
        );
        let descriptor = ComponentDescriptor::error(err.status_code(), instance_id);
        ctx.push_child(descriptor.clone());
        descriptor
    }

    /// Look up and authorize a reference without touching any context.
    ///
    /// # Arguments
    ///
    /// * `reference` - The reference to resolve.
    /// * `host` - The component the reference defaults to, if any.
    /// * `session` - The session of the request.
    /// * `instance_id` - The instance id of the resulting descriptor.
    ///
    /// # Returns
    ///
    /// * `Ok(Resolution)` - The resolved instance.
    /// * `Err(ResolveError)` - The first failing step.
    pub fn lookup(
        &self,
        reference: &ComponentReference,
        host: Option<&ComponentIdentity>,
        session: Option<&Session>,
        instance_id: InstanceId,
    ) -> Result<Resolution, ResolveError> {
        let view = reference.view().ok_or(ResolveError::MissingView)?;

        let component = match (reference.name(), reference.version()) {
            (None, Some(version)) => {
                return Err(ResolveError::AmbiguousReference {
                    version: version.to_string(),
                })
            }
            (None, None) => {
                let host = host.ok_or_else(|| {
                    ResolveError::Malformed("no component name and no host".to_string())
                })?;
                self.catalog.get(&host.id, &host.version).ok_or_else(|| {
                    ResolveError::ComponentNotFound {
                        id: host.id.clone(),
                        version: Some(host.version.clone()),
                    }
                })?
            }
            (Some(name), Some(version)) => {
                self.catalog
                    .get(name, version)
                    .ok_or_else(|| ResolveError::ComponentNotFound {
                        id: name.to_string(),
                        version: Some(version.to_string()),
                    })?
            }
            (Some(name), None) => {
                self.catalog
                    .latest(name)
                    .ok_or_else(|| ResolveError::ComponentNotFound {
                        id: name.to_string(),
                        version: None,
                    })?
            }
        };

        let guarded_view = component
            .view(view)
            .ok_or_else(|| ResolveError::ViewNotFound {
                id: component.id.clone(),
                version: component.version.clone(),
                view: view.to_string(),
            })?;

        if !self.gate.check(component.as_ref(), session) {
            return Err(ResolveError::ComponentUnauthorized {
                id: component.id.clone(),
                version: component.version.clone(),
            });
        }

        if !self.gate.check(&guarded_view, session) {
            return Err(ResolveError::ViewUnauthorized {
                id: component.id.clone(),
                version: component.version.clone(),
                view: view.to_string(),
            });
        }

        let descriptor = ComponentDescriptor {
            id: component.id.clone(),
            version: component.version.clone(),
            view: view.to_string(),
            controller: guarded_view.controller(),
            instance_id,
        };

        Ok(Resolution {
            descriptor,
            component: Arc::clone(&component),
        })
    }
}
