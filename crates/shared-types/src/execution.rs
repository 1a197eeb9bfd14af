//! # Execution Substrate
//!
//! The transactional environment every Registry and Ledger operation runs in.
//!
//! ## Guarantees
//!
//! | Guarantee | Mechanism |
//! |-----------|-----------|
//! | Serialization | re-entrant lock held by every operation and query |
//! | Atomicity | savepoint stack over an undo journal |
//! | Nested rollback | inner savepoints fold into the outer one on commit |
//! | Ambient context | network id and clock fixed per substrate |
//!
//! The serialization lock is re-entrant so that recipient code invoked from a
//! transfer effect can call back into the components on the same thread. Other
//! threads block until the outermost operation finishes.
//!
//! Components write through to their own state and register an undo action
//! with [`ExecutionSubstrate::on_rollback`] for every mutation. When an
//! operation fails, the undo actions recorded since its savepoint run in
//! reverse order. When it succeeds, its undo actions stay in the journal until
//! the outermost operation commits, so an enclosing failure still unwinds them.

use crate::clock::{Clock, SystemClock};
use crate::commitment::NetworkId;
use parking_lot::{Mutex, ReentrantMutex};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

type UndoAction = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct UndoJournal {
    /// Undo actions in the order their mutations happened.
    actions: Vec<UndoAction>,
    /// Journal length at the start of each open savepoint, innermost last.
    savepoints: Vec<usize>,
}

/// Serialized, atomic execution context shared by the components of one
/// deployment.
pub struct ExecutionSubstrate {
    network_id: NetworkId,
    clock: Arc<dyn Clock>,
    serial: ReentrantMutex<()>,
    journal: Mutex<UndoJournal>,
}

impl ExecutionSubstrate {
    /// Creates a substrate for `network_id` using wall-clock time.
    #[must_use]
    pub fn new(network_id: NetworkId) -> Self {
        Self::with_clock(network_id, Arc::new(SystemClock))
    }

    /// Creates a substrate with an explicit clock.
    #[must_use]
    pub fn with_clock(network_id: NetworkId, clock: Arc<dyn Clock>) -> Self {
        Self {
            network_id,
            clock,
            serial: ReentrantMutex::new(()),
            journal: Mutex::new(UndoJournal::default()),
        }
    }

    /// The ambient network identifier folded into every commitment.
    #[must_use]
    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    /// Current timestamp for audit records.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Number of operations currently open (0 when idle).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.journal.lock().savepoints.len()
    }

    /// Runs `op` as one atomic operation.
    ///
    /// On `Err` (or a panic) every mutation registered through
    /// [`on_rollback`](Self::on_rollback) since the operation started is
    /// undone, including those of nested operations that already succeeded.
    pub fn atomic<T, E>(&self, op: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let _serial = self.serial.lock();
        let savepoint = Savepoint::open(self);
        match op() {
            Ok(value) => {
                savepoint.commit();
                Ok(value)
            }
            Err(err) => {
                savepoint.rollback();
                Err(err)
            }
        }
    }

    /// Runs a read-only query under the serialization lock.
    pub fn observe<T>(&self, read: impl FnOnce() -> T) -> T {
        let _serial = self.serial.lock();
        read()
    }

    /// Registers an undo action for the innermost open operation.
    ///
    /// Outside of any operation there is nothing to roll back and the action
    /// is dropped.
    pub fn on_rollback(&self, undo: impl FnOnce() + Send + 'static) {
        let mut journal = self.journal.lock();
        if journal.savepoints.is_empty() {
            return;
        }
        journal.actions.push(Box::new(undo));
    }

    /// Pops the innermost savepoint and runs its undo actions, newest first.
    fn unwind(&self, position: usize) {
        let undo: Vec<UndoAction> = {
            let mut journal = self.journal.lock();
            journal.savepoints.pop();
            journal.actions.drain(position..).collect()
        };
        trace!(actions = undo.len(), "rolling back operation");
        // Undo actions lock component state, so the journal lock is released first.
        for action in undo.into_iter().rev() {
            action();
        }
    }
}

impl fmt::Debug for ExecutionSubstrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionSubstrate")
            .field("network_id", &self.network_id)
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// SAVEPOINT
// =============================================================================

/// One open operation. Dropping it without commit rolls it back.
struct Savepoint<'a> {
    substrate: &'a ExecutionSubstrate,
    position: usize,
    finished: bool,
}

impl<'a> Savepoint<'a> {
    fn open(substrate: &'a ExecutionSubstrate) -> Self {
        let mut journal = substrate.journal.lock();
        let position = journal.actions.len();
        journal.savepoints.push(position);
        Self {
            substrate,
            position,
            finished: false,
        }
    }

    fn commit(mut self) {
        self.finished = true;
        let mut journal = self.substrate.journal.lock();
        journal.savepoints.pop();
        if journal.savepoints.is_empty() {
            journal.actions.clear();
        }
    }

    fn rollback(mut self) {
        self.finished = true;
        self.substrate.unwind(self.position);
    }
}

impl Drop for Savepoint<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.substrate.unwind(self.position);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
