//! Render context.
//!
//! A render context accumulates what composing one host component's markup
//! produces: the resolved child instances, in document order, and the set
//! of stylesheets they depend on. It lives for one composition and is
//! consumed when the view is serialized.

use indexmap::IndexSet;

use tessera_core::{ChildStub, ComponentDescriptor, ComponentIdentity, Session};

/// Per-composition accumulator of children and stylesheet dependencies.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// The host component being composed.
    component: ComponentIdentity,

    /// The session of the request.
    session: Option<Session>,

    /// Resolved children, in resolution order.
    children: Vec<ComponentDescriptor>,

    /// Stylesheet dependencies, in first-seen order.
    css: IndexSet<String>,
}

impl RenderContext {
    /// Create a context for a host component.
    pub fn new(component: ComponentIdentity, session: Option<Session>) -> Self {
        Self {
            component,
            session,
            children: Vec::new(),
            css: IndexSet::new(),
        }
    }

    /// The host component.
    pub fn component(&self) -> &ComponentIdentity {
        &self.component
    }

    /// The session of the request.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The resolved children.
    pub fn children(&self) -> &[ComponentDescriptor] {
        &self.children
    }

    /// The stylesheet dependencies.
    pub fn css(&self) -> impl Iterator<Item = &str> {
        self.css.iter().map(String::as_str)
    }

    /// Append a resolved child.
    pub fn push_child(&mut self, descriptor: ComponentDescriptor) {
        self.children.push(descriptor);
    }

    /// Merge stylesheet dependencies. Already known URLs keep their position.
    pub fn add_css<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css.extend(urls.into_iter().map(Into::into));
    }

    /// Consume the context into client child stubs and stylesheet URLs.
    pub fn into_parts(self, placeholder_children: bool) -> (Vec<ChildStub>, Vec<String>) {
        let children = self
            .children
            .iter()
            .map(|child| ChildStub::from_descriptor(child, placeholder_children))
            .collect();
        (children, self.css.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{InstanceId, StatusCode};

    #[test]
    fn test_css_is_an_ordered_set() {
        let mut ctx = RenderContext::new(ComponentIdentity::new("example", "0.0.1"), None);
        ctx.add_css(["/a.css", "/b.css"]);
        ctx.add_css(["/b.css", "/c.css", "/a.css"]);

        assert_eq!(ctx.css().collect::<Vec<_>>(), vec!["/a.css", "/b.css", "/c.css"]);
    }

    #[test]
    fn test_into_parts_keeps_instance_ids() {
        let mut ctx = RenderContext::new(ComponentIdentity::new("example", "0.0.1"), None);
        let first = ComponentDescriptor::error(StatusCode::NotFound, InstanceId::new());
        let second = ComponentDescriptor::error(StatusCode::Unauthorized, InstanceId::new());
        ctx.push_child(first.clone());
        ctx.push_child(second.clone());

        let (children, css) = ctx.into_parts(true);

        assert!(css.is_empty());
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].instance_id, first.instance_id);
        assert_eq!(children[1].instance_id, second.instance_id);
        assert!(children.iter().all(|child| child.placeholder));
    }
}
