//! Placeholder scheduling.
//!
//! An armed instance stays pending until its timer fires or the real
//! component arrives, whichever comes first; either one removes it. An
//! expiring timer may only show the placeholder while the instance is still
//! pending under the ticket it was armed with, so a timer from an earlier
//! arming never acts on a later request.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

use tessera_core::InstanceId;

/// Identifies one arming of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArmTicket(u64);

/// Pending placeholder timers.
#[derive(Debug, Default)]
pub struct PlaceholderScheduler {
    pending: Mutex<HashMap<InstanceId, ArmTicket>>,
    next_ticket: AtomicU64,
}

impl PlaceholderScheduler {
    /// Create a scheduler without armed instances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an instance pending and return the ticket its timer must present.
    pub fn arm(&self, id: InstanceId) -> ArmTicket {
        let ticket = ArmTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed));
        self.pending.lock().insert(id, ticket);
        trace!(instance_id = %id, ticket = ticket.0, "Armed placeholder");
        ticket
    }

    /// Claim an expired timer.
    ///
    /// # Returns
    ///
    /// `true` if the instance was still pending under `ticket`; it is then no
    /// longer pending. `false` if it was delivered, disarmed or re-armed in
    /// the meantime.
    pub fn claim(&self, id: InstanceId, ticket: ArmTicket) -> bool {
        let mut pending = self.pending.lock();
        match pending.get(&id) {
            Some(current) if *current == ticket => {
                pending.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Cancel any pending timer of an instance.
    ///
    /// Called when the real component or the placeholder has been rendered.
    /// Returns whether a timer was pending.
    pub fn disarm(&self, id: InstanceId) -> bool {
        self.pending.lock().remove(&id).is_some()
    }

    /// The ticket an instance is pending under, if any.
    pub fn pending(&self, id: InstanceId) -> Option<ArmTicket> {
        self.pending.lock().get(&id).copied()
    }

    /// Number of pending instances.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether no instance is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
