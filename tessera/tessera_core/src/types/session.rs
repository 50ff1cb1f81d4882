//! Session data consulted by authorization.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// The session of the request being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The signed-in user, if any.
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    /// Create a session for a user.
    pub fn for_user(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// Whether the session's user holds a permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.user
            .as_ref()
            .map(|user| user.permissions.contains(permission))
            .unwrap_or(false)
    }

    /// Look up a user attribute. `country` and `language` are first-class
    /// fields; anything else comes from the free-form attribute map.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        let user = self.user.as_ref()?;
        match key {
            "country" => user.country.as_deref(),
            "language" => user.language.as_deref(),
            _ => user.attributes.get(key).map(String::as_str),
        }
    }
}

/// A user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Granted permissions.
    #[serde(default)]
    pub permissions: BTreeSet<String>,

    /// Country code, such as `US`.
    #[serde(default)]
    pub country: Option<String>,

    /// Language tag, such as `en_US`.
    #[serde(default)]
    pub language: Option<String>,

    /// Additional attributes for dynamic conditions.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl User {
    /// Create a user without permissions or attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant permissions.
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Set the country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set a free-form attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lookups() {
        let session = Session::for_user(
            User::new()
                .with_permissions(["view_button"])
                .with_country("US")
                .with_attribute("tier", "gold"),
        );

        assert!(session.has_permission("view_button"));
        assert!(!session.has_permission("view_restricted"));
        assert_eq!(session.attribute("country"), Some("US"));
        assert_eq!(session.attribute("language"), None);
        assert_eq!(session.attribute("tier"), Some("gold"));
    }

    #[test]
    fn test_anonymous_session() {
        let session = Session::default();
        assert!(!session.has_permission("anything"));
        assert_eq!(session.attribute("country"), None);
    }

    #[test]
    fn test_session_from_json() {
        let session: Session = serde_json::from_str(
            r#"{"user": {"permissions": ["view_button"], "country": "US", "language": "en_US"}}"#,
        )
        .unwrap();
        assert!(session.has_permission("view_button"));
        assert_eq!(session.attribute("language"), Some("en_US"));
    }
}
