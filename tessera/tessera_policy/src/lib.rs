//! # Tessera Policy
//!
//! `tessera_policy` decides whether a session may see a component or one of
//! its views.
//!
//! Key concepts:
//!
//! 1. **Static permissions**: a scope declares the permissions it requires;
//!    the session must hold all of them.
//!
//! 2. **Dynamic conditions**: named predicates over session attributes
//!    (country, language, ...). Names are resolved through a
//!    [`ConditionRegistry`] into a closed set of [`ConditionKind`]s.
//!
//! 3. **Granularity**: the same checks apply to components and to views.
//!    The resolver runs the component check strictly before the view check.
//!
//! Evaluation is a pure predicate over the scope and the session. A missing
//! session or attribute is a denial, never an error.

pub mod engine;
pub mod model;

// Re-export key types and traits for convenience
pub use engine::{AuthorizationGate, ConditionRegistry};
pub use model::{ConditionKind, Decision, DynamicCondition, Guarded, Scope};
