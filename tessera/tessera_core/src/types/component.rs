//! Component references and resolved descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::InstanceId;

/// Id of the component that substitutes failed resolutions.
pub const ERROR_COMPONENT_ID: &str = "error";

/// Version of the error component.
pub const ERROR_COMPONENT_VERSION: &str = "1.0";

/// Class token carried by every node holding real component markup.
pub const CONTAINER_CLASS: &str = "app-container";

/// Build the class attribute of a component container.
///
/// Dots in the version are replaced with underscores so that the
/// version-qualified token is a valid CSS class.
///
/// ```
/// use tessera_core::container_class;
///
/// assert_eq!(container_class("button", "2.0.1"), "app-container button_2_0_1");
/// ```
pub fn container_class(id: &str, version: &str) -> String {
    format!("{} {}_{}", CONTAINER_CLASS, id, version.replace('.', "_"))
}

/// A declarative reference to a component view.
///
/// `name` defaults to the component currently rendering (the host), and
/// `version` may only be given together with `name`. The reference is
/// immutable once built; validation happens in the resolver so that a bad
/// reference still produces a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentReference {
    name: Option<String>,
    version: Option<String>,
    view: Option<String>,
}

impl ComponentReference {
    /// Reference a view of the host component.
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: Some(view.into()),
            ..Self::default()
        }
    }

    /// Build a reference from raw, possibly missing, attributes.
    pub fn from_parts(name: Option<String>, version: Option<String>, view: Option<String>) -> Self {
        Self {
            name,
            version,
            view,
        }
    }

    /// Set the component name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the component version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The component name, if given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The component version, if given.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The view, if given.
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }
}

impl fmt::Display for ComponentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}",
            self.name.as_deref().unwrap_or("<host>"),
            self.version.as_deref().unwrap_or("<default>"),
            self.view.as_deref().unwrap_or("<none>")
        )
    }
}

/// The id and version of a catalogued component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentIdentity {
    /// Component id.
    pub id: String,

    /// Component version, as declared in its metadata.
    pub version: String,
}

impl ComponentIdentity {
    /// Create a new identity.
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

/// Status codes of the error component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// Authorization failed.
    Unauthorized,

    /// Unknown component, version or view.
    NotFound,

    /// Malformed reference.
    InternalError,
}

impl StatusCode {
    /// The numeric HTTP-style code.
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// A resolved component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Component id.
    pub id: String,

    /// Component version.
    pub version: String,

    /// View name.
    pub view: String,

    /// Client controller script of the view.
    pub controller: String,

    /// Identity of this occurrence.
    pub instance_id: InstanceId,
}

impl ComponentDescriptor {
    /// Build the error component descriptor for a status code.
    ///
    /// The error component has one view per status code, whose controller is
    /// `<code>.js`.
    pub fn error(status: StatusCode, instance_id: InstanceId) -> Self {
        Self {
            id: ERROR_COMPONENT_ID.to_string(),
            version: ERROR_COMPONENT_VERSION.to_string(),
            view: status.to_string(),
            controller: format!("{}.js", status),
            instance_id,
        }
    }

    /// Whether this descriptor substitutes a failed resolution.
    pub fn is_error(&self) -> bool {
        self.id == ERROR_COMPONENT_ID && self.version == ERROR_COMPONENT_VERSION
    }

    /// The id and version of the resolved component.
    pub fn identity(&self) -> ComponentIdentity {
        ComponentIdentity::new(self.id.clone(), self.version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_builders() {
        let reference = ComponentReference::new("index")
            .with_name("button")
            .with_version("1.0");
        assert_eq!(reference.name(), Some("button"));
        assert_eq!(reference.version(), Some("1.0"));
        assert_eq!(reference.view(), Some("index"));
        assert_eq!(reference.to_string(), "button@1.0:index");

        let host_view = ComponentReference::new("index");
        assert_eq!(host_view.name(), None);
        assert_eq!(host_view.to_string(), "<host>@<default>:index");
    }

    #[test]
    fn test_error_descriptor() {
        let instance_id = InstanceId::new();
        let descriptor = ComponentDescriptor::error(StatusCode::NotFound, instance_id);

        assert_eq!(descriptor.id, "error");
        assert_eq!(descriptor.version, "1.0");
        assert_eq!(descriptor.view, "404");
        assert_eq!(descriptor.controller, "404.js");
        assert_eq!(descriptor.instance_id, instance_id);
        assert!(descriptor.is_error());
    }

    #[test]
    fn test_container_class() {
        assert_eq!(container_class("example", "0.0.1"), "app-container example_0_0_1");
        assert_eq!(container_class("error", "1.0"), "app-container error_1_0");
    }

    #[test]
    fn test_descriptor_wire_format() {
        let descriptor = ComponentDescriptor::error(StatusCode::Unauthorized, InstanceId::nil());
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["controller"], "401.js");
        assert_eq!(json["instanceId"], "00000000-0000-0000-0000-000000000000");
    }
}
