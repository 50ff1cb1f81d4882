//! Authorization models.
//!
//! This module defines what a guarded scope declares and what a check
//! decides.

pub mod condition;
pub mod decision;
pub mod scope;

pub use condition::{ConditionKind, DynamicCondition};
pub use decision::Decision;
pub use scope::{Guarded, Scope};
