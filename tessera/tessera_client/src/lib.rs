//! # Tessera Client
//!
//! `tessera_client` inserts rendered components into a live document.
//!
//! Key concepts:
//!
//! 1. **Registry**: every instance on the page is tracked by its instance id,
//!    from the moment its parent declares it until it is replaced.
//!
//! 2. **Placeholder race**: a request may arm a timer; if the component has
//!    not been delivered when it expires, a placeholder is rendered into the
//!    instance instead.
//!
//! 3. **Style synchronization**: a node stays hidden until every stylesheet
//!    its component depends on is loaded.
//!
//! The [`ClientRenderer`] is an explicit handle; its collaborators are passed
//! in at construction.

pub mod dom;
pub mod placeholder;
pub mod registry;
pub mod renderer;
pub mod styles;
pub mod transport;

// Re-export key types for convenience
pub use dom::{Dom, MemoryDom};
pub use placeholder::{ArmTicket, PlaceholderScheduler};
pub use registry::{ClientComponentRecord, ComponentRegistry, RegistryEntry};
pub use renderer::ClientRenderer;
pub use styles::{ImmediateProbe, StyleLoad, StyleLoader, StyleProbe};
pub use transport::{channel, ChannelTransport, PendingRender, ServerChannel, Transport};
