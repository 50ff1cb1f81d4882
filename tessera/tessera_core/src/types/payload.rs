//! Messages exchanged over the render transport.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::id::InstanceId;
use crate::types::component::ComponentDescriptor;

/// A client request to render a component instance.
///
/// Fields are optional on the wire; the client renderer refuses to send a
/// request missing `id`, `instance_id` or `view`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Component id.
    #[serde(default)]
    pub id: Option<String>,

    /// Component version, latest when absent.
    #[serde(default)]
    pub version: Option<String>,

    /// View name.
    #[serde(default)]
    pub view: Option<String>,

    /// Instance the markup is rendered into.
    #[serde(default)]
    pub instance_id: Option<InstanceId>,

    /// Show the placeholder if the instance is not delivered in time.
    #[serde(default)]
    pub placeholder: bool,
}

impl RenderRequest {
    /// Create a complete request.
    pub fn new(
        id: impl Into<String>,
        version: impl Into<String>,
        view: impl Into<String>,
        instance_id: InstanceId,
    ) -> Self {
        Self {
            id: Some(id.into()),
            version: Some(version.into()),
            view: Some(view.into()),
            instance_id: Some(instance_id),
            placeholder: false,
        }
    }

    /// Request the placeholder race for this instance.
    pub fn with_placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }

    /// The names of the required fields that are missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.is_none() {
            missing.push("id");
        }
        if self.instance_id.is_none() {
            missing.push("instanceId");
        }
        if self.view.is_none() {
            missing.push("view");
        }
        missing
    }
}

/// A child instance declared by a rendered component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildStub {
    /// Component id.
    pub id: String,

    /// Component version.
    pub version: String,

    /// View name.
    pub view: String,

    /// Client controller script.
    pub controller: String,

    /// Identity of the child occurrence.
    pub instance_id: InstanceId,

    /// Whether the child races a placeholder.
    #[serde(default)]
    pub placeholder: bool,
}

impl ChildStub {
    /// Build a stub from a resolved descriptor.
    pub fn from_descriptor(descriptor: &ComponentDescriptor, placeholder: bool) -> Self {
        Self {
            id: descriptor.id.clone(),
            version: descriptor.version.clone(),
            view: descriptor.view.clone(),
            controller: descriptor.controller.clone(),
            instance_id: descriptor.instance_id,
            placeholder,
        }
    }

    /// The render request that delivers this child.
    pub fn to_request(&self) -> RenderRequest {
        RenderRequest {
            id: Some(self.id.clone()),
            version: Some(self.version.clone()),
            view: Some(self.view.clone()),
            instance_id: Some(self.instance_id),
            placeholder: self.placeholder,
        }
    }
}

/// A rendered component pushed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPayload {
    /// Component id.
    pub id: String,

    /// Component version.
    pub version: String,

    /// View name.
    pub view: String,

    /// Client controller script.
    pub controller: String,

    /// Instance the markup belongs to.
    pub instance_id: InstanceId,

    /// Markup of the view.
    #[serde(default)]
    pub html: String,

    /// Stylesheet dependencies, in load order.
    #[serde(default)]
    pub css: Vec<String>,

    /// Child instances declared in the markup.
    #[serde(default)]
    pub children: Vec<ChildStub>,
}

impl ComponentPayload {
    /// Create a payload for a descriptor with the given markup.
    pub fn new(descriptor: ComponentDescriptor, html: impl Into<String>) -> Self {
        Self {
            id: descriptor.id,
            version: descriptor.version,
            view: descriptor.view,
            controller: descriptor.controller,
            instance_id: descriptor.instance_id,
            html: html.into(),
            css: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the stylesheet dependencies.
    pub fn with_css<I, S>(mut self, css: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css = css.into_iter().map(Into::into).collect();
        self
    }

    /// Set the declared children.
    pub fn with_children(mut self, children: Vec<ChildStub>) -> Self {
        self.children = children;
        self
    }

    /// A copy of this payload bound to another instance.
    pub fn rebind(&self, instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            ..self.clone()
        }
    }
}

/// Settings the server hands to the client renderer before first use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    /// Milliseconds to wait before showing the placeholder.
    pub placeholder_timeout_ms: u64,

    /// The rendered placeholder component.
    pub placeholder: Option<ComponentPayload>,
}

impl ClientSettings {
    /// The placeholder timeout as a duration.
    pub fn placeholder_timeout(&self) -> Duration {
        Duration::from_millis(self.placeholder_timeout_ms)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            placeholder_timeout_ms: 500,
            placeholder: None,
        }
    }
}
