//! # Audit Trail
//!
//! Append-only event records, the system's sole audit trail. A record is
//! appended inside the running operation and removed again if that operation
//! rolls back, so the trail only ever shows effects that actually happened.

use crate::execution::ExecutionSubstrate;
use crate::value_objects::Address;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One emitted event with its position and time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord<E> {
    /// Position in the emitter's trail, starting at 0.
    pub sequence: u64,
    /// Unix timestamp (seconds) from the substrate clock.
    pub timestamp: u64,
    /// Identity of the component that emitted the event.
    pub emitter: Address,
    /// The event payload.
    pub event: E,
}

/// Append-only log of one component's events.
#[derive(Debug)]
pub struct EventLog<E> {
    emitter: Address,
    records: Arc<Mutex<Vec<AuditRecord<E>>>>,
}

impl<E> EventLog<E>
where
    E: Clone + Send + 'static,
{
    /// Creates an empty log for `emitter`.
    #[must_use]
    pub fn new(emitter: Address) -> Self {
        Self {
            emitter,
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends `event` within the current operation of `substrate`.
    pub fn emit(&self, substrate: &ExecutionSubstrate, event: E) -> AuditRecord<E> {
        let record = {
            let mut records = self.records.lock();
            let record = AuditRecord {
                sequence: records.len() as u64,
                timestamp: substrate.now(),
                emitter: self.emitter,
                event,
            };
            records.push(record.clone());
            record
        };

        let records = Arc::clone(&self.records);
        substrate.on_rollback(move || {
            records.lock().pop();
        });
        record
    }

    /// Snapshot of every record, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord<E>> {
        self.records.lock().clone()
    }

    /// The most recent record, if any.
    #[must_use]
    pub fn last(&self) -> Option<AuditRecord<E>> {
        self.records.lock().last().cloned()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns true if nothing was emitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}
