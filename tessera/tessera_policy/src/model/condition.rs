//! Dynamic condition model.

use serde::{Deserialize, Serialize};
use std::fmt;
use tessera_core::Session;

/// A dynamic condition declared by a component or view.
///
/// In metadata it reads `{"condition": "country", "allowed": ["US"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicCondition {
    /// Name of the predicate, resolved through the condition registry.
    #[serde(rename = "condition")]
    pub name: String,

    /// Values of the session attribute that satisfy the condition.
    #[serde(default)]
    pub allowed: Vec<String>,
}

impl DynamicCondition {
    /// Create a new condition.
    pub fn new<I, S>(name: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for DynamicCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in [{}]", self.name, self.allowed.join(", "))
    }
}

/// The closed set of predicates a dynamic condition can name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// Match the user's country.
    Country,

    /// Match the user's language.
    Language,

    /// Match a free-form user attribute.
    Attribute(String),
}

impl ConditionKind {
    /// The session attribute this predicate reads.
    pub fn attribute_key(&self) -> &str {
        match self {
            Self::Country => "country",
            Self::Language => "language",
            Self::Attribute(key) => key,
        }
    }

    /// Evaluate the predicate.
    ///
    /// Returns `false` when there is no session or the attribute is absent.
    pub fn evaluate(&self, allowed: &[String], session: Option<&Session>) -> bool {
        session
            .and_then(|session| session.attribute(self.attribute_key()))
            .map(|value| allowed.iter().any(|candidate| candidate == value))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::User;

    #[test]
    fn test_country_condition() {
        let allowed = vec!["US".to_string(), "CA".to_string()];
        let us = Session::for_user(User::new().with_country("US"));
        let ro = Session::for_user(User::new().with_country("RO"));

        assert!(ConditionKind::Country.evaluate(&allowed, Some(&us)));
        assert!(!ConditionKind::Country.evaluate(&allowed, Some(&ro)));
    }

    #[test]
    fn test_missing_attribute_fails() {
        let allowed = vec!["en_US".to_string()];
        let no_language = Session::for_user(User::new().with_country("US"));

        assert!(!ConditionKind::Language.evaluate(&allowed, Some(&no_language)));
        assert!(!ConditionKind::Language.evaluate(&allowed, None));
        assert!(!ConditionKind::Language.evaluate(&allowed, Some(&Session::default())));
    }

    #[test]
    fn test_attribute_condition() {
        let allowed = vec!["gold".to_string()];
        let session = Session::for_user(User::new().with_attribute("tier", "gold"));
        let kind = ConditionKind::Attribute("tier".to_string());

        assert_eq!(kind.attribute_key(), "tier");
        assert!(kind.evaluate(&allowed, Some(&session)));
    }

    #[test]
    fn test_condition_from_metadata() {
        let condition: DynamicCondition =
            serde_json::from_str(r#"{"condition": "country", "allowed": ["US"]}"#).unwrap();
        assert_eq!(condition, DynamicCondition::new("country", ["US"]));
        assert_eq!(condition.to_string(), "country in [US]");
    }
}
