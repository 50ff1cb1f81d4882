//! Error types for the Tessera composition system.
//!
//! Errors are organized by subsystem. The root error type, `Error`, wraps
//! any of the subsystem-specific errors so that application edges can
//! handle them uniformly.
//!
//! Note that [`ResolveError`] never reaches the caller of the resolver: it is
//! converted into an error descriptor through [`ResolveError::status_code`].

use crate::id::InstanceId;
use crate::types::StatusCode;
use thiserror::Error;

/// Root error type for Tessera.
#[derive(Debug, Error)]
pub enum Error {
    /// Component catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Component resolution errors
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Client registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Errors raised while resolving a component reference.
///
/// Each variant maps onto the status code of the error component that
/// substitutes the requested one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The reference does not name a view
    #[error("component reference has no view")]
    MissingView,

    /// A version was given without the component it belongs to
    #[error("version {version} given without a component name")]
    AmbiguousReference {
        /// The orphaned version
        version: String,
    },

    /// The reference could not be parsed
    #[error("malformed component reference: {0}")]
    Malformed(String),

    /// No such component, or no such version of it
    #[error("component {id}@{} not found", .version.as_deref().unwrap_or("latest"))]
    ComponentNotFound {
        /// Component id
        id: String,
        /// Requested version, `None` for the latest one
        version: Option<String>,
    },

    /// The component exists but has no such view
    #[error("view {view} not found in {id}@{version}")]
    ViewNotFound {
        /// Component id
        id: String,
        /// Component version
        version: String,
        /// Requested view
        view: String,
    },

    /// Component-level authorization failed
    #[error("access to {id}@{version} denied")]
    ComponentUnauthorized {
        /// Component id
        id: String,
        /// Component version
        version: String,
    },

    /// View-level authorization failed
    #[error("access to view {view} of {id}@{version} denied")]
    ViewUnauthorized {
        /// Component id
        id: String,
        /// Component version
        version: String,
        /// Denied view
        view: String,
    },
}

impl ResolveError {
    /// The status code of the error component substituted for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingView | Self::AmbiguousReference { .. } | Self::Malformed(_) => {
                StatusCode::InternalError
            }
            Self::ComponentNotFound { .. } | Self::ViewNotFound { .. } => StatusCode::NotFound,
            Self::ComponentUnauthorized { .. } | Self::ViewUnauthorized { .. } => {
                StatusCode::Unauthorized
            }
        }
    }
}

/// Errors related to the component catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The component version is already catalogued
    #[error("component {id}@{version} already exists")]
    Conflict {
        /// Component id
        id: String,
        /// Component version
        version: String,
    },

    /// Component metadata could not be read or is invalid
    #[error("invalid component metadata in {path}: {reason}")]
    InvalidMetadata {
        /// Path of the metadata file
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// The version string is not a valid version
    #[error("invalid version: {0}")]
    InvalidVersion(String),
}

/// Errors related to the client component registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The instance was already reserved and not yet registered
    #[error("instance {0} is already pre-registered")]
    AlreadyPreRegistered(InstanceId),

    /// The instance already holds rendered markup
    #[error("instance {0} is already registered")]
    AlreadyRegistered(InstanceId),

    /// The instance is unknown to the registry
    #[error("instance {0} is not registered")]
    NotRegistered(InstanceId),
}

/// Errors related to the render transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The channel to the server is closed
    #[error("transport channel closed")]
    Closed,

    /// The server leg dropped the acknowledgement
    #[error("render request for {0} was never acknowledged")]
    AckDropped(String),
}

/// Result type for Tessera operations.
pub type Result<T> = std::result::Result<T, Error>;
