//! Condition lookup table.
//!
//! Maps condition names used in metadata onto [`ConditionKind`]s. Only
//! names present in the table can be evaluated, which keeps the set of
//! predicates the gate may run explicit.

use std::collections::HashMap;
use tracing::warn;

use crate::model::ConditionKind;

/// Prefix of condition names that match a free-form user attribute.
pub const ATTRIBUTE_PREFIX: &str = "attribute:";

/// Lookup table from condition names to predicates.
#[derive(Debug, Clone, Default)]
pub struct ConditionRegistry {
    kinds: HashMap<String, ConditionKind>,
}

impl ConditionRegistry {
    /// Create an empty registry. Every dynamic condition fails against it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in `country` and `language`
    /// conditions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("country", ConditionKind::Country);
        registry.register("language", ConditionKind::Language);
        registry
    }

    /// Create a registry enabling only the named conditions.
    ///
    /// Besides the built-ins, `attribute:<key>` enables a condition over the
    /// user attribute `<key>`. Unrecognised names are skipped with a warning.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in names {
            let name = name.as_ref();
            match Self::builtin(name) {
                Some(kind) => registry.register(name, kind),
                None => warn!(condition = name, "Ignoring unknown dynamic condition"),
            }
        }
        registry
    }

    fn builtin(name: &str) -> Option<ConditionKind> {
        match name {
            "country" => Some(ConditionKind::Country),
            "language" => Some(ConditionKind::Language),
            _ => name
                .strip_prefix(ATTRIBUTE_PREFIX)
                .filter(|key| !key.is_empty())
                .map(|key| ConditionKind::Attribute(key.to_string())),
        }
    }

    /// Register a condition under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, kind: ConditionKind) {
        self.kinds.insert(name.into(), kind);
    }

    /// Look up a condition by name.
    pub fn get(&self, name: &str) -> Option<&ConditionKind> {
        self.kinds.get(name)
    }

    /// The registered condition names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
