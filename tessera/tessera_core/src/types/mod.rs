//! Data structures shared by the server and the client.

pub mod component;
pub mod payload;
pub mod session;

pub use component::{
    container_class, ComponentDescriptor, ComponentIdentity, ComponentReference, StatusCode,
    CONTAINER_CLASS, ERROR_COMPONENT_ID, ERROR_COMPONENT_VERSION,
};
pub use payload::{ChildStub, ClientSettings, ComponentPayload, RenderRequest};
pub use session::{Session, User};
