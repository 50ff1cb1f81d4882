//! Authorization engine.
//!
//! This module provides the gate and the condition lookup table it uses.

mod gate;
mod registry;

pub use gate::AuthorizationGate;
pub use registry::ConditionRegistry;
