//! Command implementations

pub mod catalog;
pub mod render;
pub mod resolve;
