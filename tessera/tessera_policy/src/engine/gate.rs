//! Authorization gate.
//!
//! This module checks guarded scopes against the session of the request
//! being composed.

use tessera_core::Session;
use tracing::debug;

use crate::engine::ConditionRegistry;
use crate::model::{Decision, Guarded};

/// Authorization gate.
///
/// Static permissions are checked before dynamic conditions and the first
/// failing requirement decides.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    /// The condition lookup table.
    conditions: ConditionRegistry,
}

impl AuthorizationGate {
    /// Create a new gate.
    pub fn new(conditions: ConditionRegistry) -> Self {
        Self { conditions }
    }

    /// The condition lookup table.
    pub fn conditions(&self) -> &ConditionRegistry {
        &self.conditions
    }

    /// Evaluate a scope against a session.
    ///
    /// # Arguments
    ///
    /// * `guarded` - The component or view being accessed.
    /// * `session` - The session of the request, if any.
    ///
    /// # Returns
    ///
    /// The decision, naming the first requirement that failed.
    pub fn evaluate<G>(&self, guarded: &G, session: Option<&Session>) -> Decision
    where
        G: Guarded + ?Sized,
    {
        let decision = self.evaluate_requirements(guarded, session);
        debug!(scope = %guarded.scope(), decision = %decision, "Authorization evaluated");
        decision
    }

    fn evaluate_requirements<G>(&self, guarded: &G, session: Option<&Session>) -> Decision
    where
        G: Guarded + ?Sized,
    {
        let permissions = guarded.required_permissions();
        let conditions = guarded.dynamic_conditions();

        if permissions.is_empty() && conditions.is_empty() {
            return Decision::Granted;
        }

        let Some(session) = session else {
            return Decision::SessionRequired;
        };

        if let Some(missing) = permissions.iter().find(|p| !session.has_permission(p)) {
            return Decision::MissingPermission(missing.clone());
        }

        for condition in conditions {
            match self.conditions.get(&condition.name) {
                Some(kind) => {
                    if !kind.evaluate(&condition.allowed, Some(session)) {
                        return Decision::ConditionFailed(condition.to_string());
                    }
                }
                None => return Decision::UnknownCondition(condition.name.clone()),
            }
        }

        Decision::Granted
    }

    /// Check whether a session may access a scope.
    pub fn check<G>(&self, guarded: &G, session: Option<&Session>) -> bool
    where
        G: Guarded + ?Sized,
    {
        self.evaluate(guarded, session).is_granted()
    }
}

impl Default for AuthorizationGate {
    fn default() -> Self {
        Self::new(ConditionRegistry::with_builtins())
    }
}
