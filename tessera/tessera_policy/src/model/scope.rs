//! Guarded scopes.

use std::fmt;

use crate::model::DynamicCondition;

/// The granularity of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// A whole component version.
    Component {
        /// Component id.
        id: String,
        /// Component version.
        version: String,
    },

    /// One view of a component version.
    View {
        /// Component id.
        id: String,
        /// Component version.
        version: String,
        /// View name.
        view: String,
    },
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component { id, version } => write!(f, "component {}@{}", id, version),
            Self::View { id, version, view } => write!(f, "view {}@{}:{}", id, version, view),
        }
    }
}

/// Anything that declares authorization requirements.
pub trait Guarded {
    /// The scope being guarded.
    fn scope(&self) -> Scope;

    /// Permissions the session must hold.
    fn required_permissions(&self) -> &[String];

    /// Dynamic conditions the session must satisfy.
    fn dynamic_conditions(&self) -> &[DynamicCondition];
}
