//! Template directive surface.
//!
//! Views embed child components with a directive:
//!
//! ```text
//! <nav>{{component name="button" version="1.0" view="index"}}</nav>
//! ```
//!
//! Only `name`, `version` and `view` are recognised. Composing a template
//! resolves every directive into the render context and replaces it with the
//! container the client renders the child into. Other `{{...}}` tags are left
//! untouched.

use std::collections::HashMap;
use tracing::debug;

use tessera_core::error::ResolveError;
use tessera_core::{ComponentReference, InstanceId};

use crate::catalog::ComponentCatalog;
use crate::context::RenderContext;
use crate::resolver::ComponentResolver;

const KEYWORD: &str = "component";
const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A parsed component directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    reference: ComponentReference,
}

impl Directive {
    /// Parse the body of a directive, without its braces.
    ///
    /// # Returns
    ///
    /// * `Ok(Directive)` - The directive. A missing view is not a parse error;
    ///   it is reported when the reference is resolved.
    /// * `Err(ResolveError::Malformed)` - If the body is not a component
    ///   directive or an attribute cannot be read.
    pub fn parse(body: &str) -> Result<Self, ResolveError> {
        let body = body.trim();
        let rest = body
            .strip_prefix(KEYWORD)
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
            .ok_or_else(|| ResolveError::Malformed(format!("not a component directive: {}", body)))?;

        Ok(Self::from_attributes(parse_attributes(rest)?))
    }

    /// Build a directive from already parsed attributes.
    pub fn from_attributes(mut attributes: HashMap<String, String>) -> Self {
        let reference = ComponentReference::from_parts(
            attributes.remove("name"),
            attributes.remove("version"),
            attributes.remove("view"),
        );
        for key in attributes.keys() {
            debug!(attribute = %key, "Ignoring unknown directive attribute");
        }
        Self { reference }
    }

    /// The component reference.
    pub fn reference(&self) -> &ComponentReference {
        &self.reference
    }

    /// Resolve the directive into the context and return its container markup.
    pub fn apply<C>(&self, resolver: &ComponentResolver<C>, ctx: &mut RenderContext) -> String
    where
        C: ComponentCatalog,
    {
        let descriptor = resolver.resolve(&self.reference, ctx);
        container(descriptor.instance_id)
    }
}

/// The markup the client binds a child instance to.
pub fn container(instance_id: InstanceId) -> String {
    format!("<div id=\"{}\"></div>", instance_id)
}

/// Compose a template, resolving its component directives into the context.
///
/// A directive that cannot be parsed still produces a child: the error
/// component for a malformed reference.
pub fn compose<C>(template: &str, resolver: &ComponentResolver<C>, ctx: &mut RenderContext) -> String
where
    C: ComponentCatalog,
{
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let Some(end) = after_open.find(CLOSE) else {
            output.push_str(&rest[start..]);
            return output;
        };

        let body = &after_open[..end];
        let tag = &rest[start..start + OPEN.len() + end + CLOSE.len()];
        rest = &after_open[end + CLOSE.len()..];

        if !is_component_tag(body) {
            output.push_str(tag);
            continue;
        }

        match Directive::parse(body) {
            Ok(directive) => output.push_str(&directive.apply(resolver, ctx)),
            Err(err) => {
                let descriptor = resolver.substitute(err, InstanceId::new(), ctx);
                output.push_str(&container(descriptor.instance_id));
            }
        }
    }

    output.push_str(rest);
    output
}

fn is_component_tag(body: &str) -> bool {
    let body = body.trim_start();
    body.strip_prefix(KEYWORD)
        .map(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        .unwrap_or(false)
}

fn parse_attributes(input: &str) -> Result<HashMap<String, String>, ResolveError> {
    let mut attributes = HashMap::new();
    let mut chars = input.trim().chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            return Ok(attributes);
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| c.is_alphanumeric() || *c == '_' || *c == '-') {
            key.push(c);
        }
        if key.is_empty() || chars.next() != Some('=') {
            return Err(ResolveError::Malformed(format!(
                "expected key=value in directive near {:?}",
                input.trim()
            )));
        }

        let value = match chars.peek().copied() {
            Some(quote @ ('"' | '\'')) => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some(c) if c == quote => break,
                        Some(c) => value.push(c),
                        None => {
                            return Err(ResolveError::Malformed(format!(
                                "unterminated value for {}",
                                key
                            )))
                        }
                    }
                }
                value
            }
            _ => {
                let mut value = String::new();
                while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                    value.push(c);
                }
                value
            }
        };

        if attributes.insert(key.clone(), value).is_some() {
            return Err(ResolveError::Malformed(format!("duplicate attribute {}", key)));
        }
    }
}
