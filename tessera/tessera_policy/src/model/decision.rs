//! Authorization decisions.

use std::fmt;

/// The outcome of checking a scope against a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Every requirement holds.
    Granted,

    /// The scope has requirements but there is no session.
    SessionRequired,

    /// The session lacks a required permission.
    MissingPermission(String),

    /// A dynamic condition did not hold.
    ConditionFailed(String),

    /// A dynamic condition names no known or enabled predicate.
    UnknownCondition(String),
}

impl Decision {
    /// Whether access is granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "Granted"),
            Self::SessionRequired => write!(f, "Session required"),
            Self::MissingPermission(permission) => {
                write!(f, "Missing permission '{}'", permission)
            }
            Self::ConditionFailed(condition) => write!(f, "Condition failed: {}", condition),
            Self::UnknownCondition(name) => write!(f, "Unknown condition '{}'", name),
        }
    }
}
