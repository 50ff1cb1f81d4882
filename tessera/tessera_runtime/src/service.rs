//! Render service.
//!
//! The server leg of the `render` event: a client asks for one instance and
//! receives the rendered component, its stylesheets and the child instances
//! its markup declares.

use tracing::{debug, warn};

use tessera_core::{
    ComponentDescriptor, ComponentPayload, ComponentReference, InstanceId, RenderRequest, Session,
    ERROR_COMPONENT_ID, ERROR_COMPONENT_VERSION,
};

use crate::catalog::{ComponentCatalog, ComponentMeta};
use crate::context::RenderContext;
use crate::directive::compose;
use crate::resolver::ComponentResolver;

/// Renders requested component instances into payloads.
pub struct RenderService<C> {
    /// The resolver.
    resolver: ComponentResolver<C>,

    /// Whether declared children race the placeholder on the client.
    async_children: bool,
}

impl<C> RenderService<C>
where
    C: ComponentCatalog,
{
    /// Create a new render service.
    ///
    /// # Arguments
    ///
    /// * `resolver` - The component resolver.
    /// * `async_children` - Whether children are marked placeholder-eligible.
    pub fn new(resolver: ComponentResolver<C>, async_children: bool) -> Self {
        Self {
            resolver,
            async_children,
        }
    }

    /// The resolver.
    pub fn resolver(&self) -> &ComponentResolver<C> {
        &self.resolver
    }

    /// Render a requested instance.
    ///
    /// Resolution failures produce the error component bound to the
    /// requested instance id, so the client replaces exactly the node it
    /// asked for.
    pub fn handle(&self, request: &RenderRequest, session: Option<&Session>) -> ComponentPayload {
        let instance_id = request.instance_id.unwrap_or_else(|| {
            warn!("Render request without instance id, assigning a fresh one");
            InstanceId::new()
        });
        let reference = ComponentReference::from_parts(
            request.id.clone(),
            request.version.clone(),
            request.view.clone(),
        );

        match self.resolver.lookup(&reference, None, session, instance_id) {
            Ok(resolution) => {
                debug!(instance_id = %instance_id, "Rendering {}", reference);
                self.render(resolution.descriptor, &resolution.component, session)
            }
            Err(err) => {
                warn!(
                    instance_id = %instance_id,
                    status = %err.status_code(),
                    "Render of {} failed: {}",
                    reference,
                    err
                );
                self.render_error(ComponentDescriptor::error(err.status_code(), instance_id), session)
            }
        }
    }

    fn render_error(
        &self,
        descriptor: ComponentDescriptor,
        session: Option<&Session>,
    ) -> ComponentPayload {
        match self
            .resolver
            .catalog()
            .get(ERROR_COMPONENT_ID, ERROR_COMPONENT_VERSION)
        {
            Some(component) if component.views.contains_key(&descriptor.view) => {
                self.render(descriptor, &component, session)
            }
            _ => {
                debug!(view = %descriptor.view, "Error component not catalogued, sending empty markup");
                ComponentPayload::new(descriptor, "")
            }
        }
    }

    fn render(
        &self,
        descriptor: ComponentDescriptor,
        component: &ComponentMeta,
        session: Option<&Session>,
    ) -> ComponentPayload {
        let template = component
            .view(&descriptor.view)
            .map(|view| view.template().to_string())
            .unwrap_or_default();

        let mut ctx = RenderContext::new(component.identity(), session.cloned());
        ctx.add_css(component.css.iter().cloned());
        let html = compose(&template, &self.resolver, &mut ctx);
        let (children, css) = ctx.into_parts(self.async_children);

        ComponentPayload::new(descriptor, html)
            .with_css(css)
            .with_children(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryCatalog, ViewMeta};
    use tessera_core::User;
    use tessera_policy::AuthorizationGate;

    fn service(with_error_component: bool) -> RenderService<InMemoryCatalog> {
        let catalog = InMemoryCatalog::new();
        catalog
            .insert(
                ComponentMeta::new("example", "0.0.1")
                    .with_css("/example/0.0.1/example.css")
                    .with_view(
                        "index",
                        ViewMeta::new().with_template(
                            "<main>{{component name=\"button\" version=\"1.0\" view=\"index\"}}\
                             {{component name=\"button\" version=\"1.0\" view=\"restricted\"}}</main>",
                        ),
                    ),
            )
            .unwrap();
        catalog
            .insert(
                ComponentMeta::new("button", "1.0")
                    .with_css("/button/1.0/button.css")
                    .with_view("index", ViewMeta::new().with_template("<button></button>"))
                    .with_view(
                        "restricted",
                        ViewMeta::new()
                            .with_controller("index.js")
                            .with_permission("view_restricted"),
                    ),
            )
            .unwrap();
        if with_error_component {
            catalog
                .insert(
                    ComponentMeta::new("error", "1.0")
                        .with_view("404", ViewMeta::new().with_template("<p>Not found</p>")),
                )
                .unwrap();
        }
        RenderService::new(
            ComponentResolver::new(catalog, AuthorizationGate::default()),
            true,
        )
    }

    #[test]
    fn test_handle_composes_children() {
        let service = service(false);
        let instance_id = InstanceId::new();

        let payload = service.handle(
            &RenderRequest::new("example", "0.0.1", "index", instance_id),
            None,
        );

        assert_eq!(payload.instance_id, instance_id);
        assert_eq!(payload.controller, "index.js");
        assert_eq!(
            payload.css,
            vec!["/example/0.0.1/example.css", "/button/1.0/button.css"]
        );
        assert_eq!(payload.children.len(), 2);
        assert_eq!(payload.children[0].id, "button");
        assert_eq!(payload.children[1].controller, "401.js");
        assert!(payload.children.iter().all(|child| child.placeholder));
        for child in &payload.children {
            assert!(payload.html.contains(&format!("<div id=\"{}\"></div>", child.instance_id)));
        }
    }

    #[test]
    fn test_session_reaches_children() {
        let service = service(false);
        let session = Session::for_user(User::default().with_permissions(["view_restricted"]));

        let payload = service.handle(
            &RenderRequest::new("example", "0.0.1", "index", InstanceId::new()),
            Some(&session),
        );

        assert!(payload.children.iter().all(|child| child.id == "button"));
    }

    #[test]
    fn test_failure_reuses_request_instance_id() {
        let service = service(true);
        let instance_id = InstanceId::new();

        let payload = service.handle(
            &RenderRequest::new("button", "9.9", "index", instance_id),
            None,
        );

        assert_eq!(payload.id, "error");
        assert_eq!(payload.controller, "404.js");
        assert_eq!(payload.instance_id, instance_id);
        assert_eq!(payload.html, "<p>Not found</p>");
    }

    #[test]
    fn test_failure_without_error_component_is_empty() {
        let service = service(false);
        let request = RenderRequest {
            id: Some("button".to_string()),
            instance_id: Some(InstanceId::new()),
            ..RenderRequest::default()
        };

        let payload = service.handle(&request, None);

        assert_eq!(payload.controller, "500.js");
        assert!(payload.html.is_empty());
        assert!(payload.children.is_empty());
    }
}
