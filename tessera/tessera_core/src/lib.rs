//! # Tessera Core
//!
//! `tessera_core` provides the building blocks shared by the server-side
//! composition pipeline and the client-side insertion pipeline of Tessera.
//!
//! ## Core Principles
//!
//! 1. **Total resolution**: every component reference placed in a page
//!    resolves to a descriptor. Failures are substituted by an error
//!    component whose controller encodes the status code.
//!
//! 2. **Stable instance identity**: each occurrence of a component in a
//!    rendered page carries an [`InstanceId`] that never changes between
//!    resolution, serialization and insertion on the client.
//!
//! 3. **Version-qualified styling**: the markup of an instance is tagged with
//!    a CSS-safe class derived from the component id and version, see
//!    [`types::container_class`].
//!
//! ## Crate Structure
//!
//! - **error**: Error types for all Tessera components
//! - **id**: Strongly-typed identifier types
//! - **types**: Data structures exchanged between server and client
//! - **version**: Version parsing and ordering

pub mod error;
pub mod id;
pub mod types;
pub mod version;

// Re-export key types for convenience
pub use error::{Error, Result};
pub use id::InstanceId;
pub use types::{
    container_class, ChildStub, ClientSettings, ComponentDescriptor, ComponentIdentity,
    ComponentPayload, ComponentReference, RenderRequest, Session, StatusCode, User,
    CONTAINER_CLASS, ERROR_COMPONENT_ID, ERROR_COMPONENT_VERSION,
};
pub use version::Version;
