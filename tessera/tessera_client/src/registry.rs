//! Client component registry.
//!
//! Tracks every component instance known to the page. An instance is
//! pre-registered when its parent declares it, registered once its markup is
//! inserted, and deregistered right before a re-render replaces it.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use tessera_core::error::RegistryError;
use tessera_core::{ChildStub, ComponentPayload, InstanceId};

/// A registered instance with its markup.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientComponentRecord {
    /// The rendered component.
    pub component: ComponentPayload,

    /// When the markup was inserted.
    pub registered_at: DateTime<Utc>,
}

/// Registry entry of one instance.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEntry {
    /// Declared by a parent, markup not yet present.
    PreRegistered(ChildStub),

    /// Markup present; the record is authoritative.
    Registered(ClientComponentRecord),
}

/// Registry of the component instances of a page.
///
/// Only the renderer writes to the registry.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: RwLock<HashMap<InstanceId, RegistryEntry>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an instance declared by a parent.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the instance was reserved.
    /// * `Err(RegistryError)` - If the instance is already reserved or
    ///   already holds markup.
    pub fn pre_register(&self, stub: &ChildStub) -> Result<(), RegistryError> {
        let mut entries = self.entries.write();
        match entries.get(&stub.instance_id) {
            Some(RegistryEntry::PreRegistered(_)) => {
                Err(RegistryError::AlreadyPreRegistered(stub.instance_id))
            }
            Some(RegistryEntry::Registered(_)) => {
                Err(RegistryError::AlreadyRegistered(stub.instance_id))
            }
            None => {
                entries.insert(stub.instance_id, RegistryEntry::PreRegistered(stub.clone()));
                Ok(())
            }
        }
    }

    /// Register an instance whose markup was inserted.
    ///
    /// Any prior entry for the instance is deregistered first.
    pub fn register(&self, component: &ComponentPayload) {
        let mut entries = self.entries.write();
        if let Some(previous) = entries.remove(&component.instance_id) {
            debug!(
                instance_id = %component.instance_id,
                replaced_registered = matches!(previous, RegistryEntry::Registered(_)),
                "Deregistered before re-registration"
            );
        }
        entries.insert(
            component.instance_id,
            RegistryEntry::Registered(ClientComponentRecord {
                component: component.clone(),
                registered_at: Utc::now(),
            }),
        );
    }

    /// Remove an instance. Removing an unknown instance is a no-op.
    pub fn deregister(&self, id: InstanceId) -> Option<RegistryEntry> {
        self.entries.write().remove(&id)
    }

    /// The entry of an instance.
    pub fn get(&self, id: InstanceId) -> Option<RegistryEntry> {
        self.entries.read().get(&id).cloned()
    }

    /// The record of a registered instance.
    pub fn record(&self, id: InstanceId) -> Result<ClientComponentRecord, RegistryError> {
        match self.entries.read().get(&id) {
            Some(RegistryEntry::Registered(record)) => Ok(record.clone()),
            _ => Err(RegistryError::NotRegistered(id)),
        }
    }

    /// Whether an instance holds markup.
    pub fn is_registered(&self, id: InstanceId) -> bool {
        matches!(self.entries.read().get(&id), Some(RegistryEntry::Registered(_)))
    }

    /// Whether an instance is reserved without markup.
    pub fn is_pre_registered(&self, id: InstanceId) -> bool {
        matches!(self.entries.read().get(&id), Some(RegistryEntry::PreRegistered(_)))
    }

    /// The number of known instances.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no instance is known.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
