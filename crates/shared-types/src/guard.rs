//! # Reentrancy Guard
//!
//! Per-operation non-reentrant lock. An operation holds its guard for its whole
//! duration, including any external effect it triggers, so a synchronous
//! callback into the same operation is refused instead of executed.

use std::sync::atomic::{AtomicBool, Ordering};

/// Non-reentrant flag for one named operation on one component instance.
#[derive(Debug)]
pub struct ReentrancyLock {
    operation: &'static str,
    entered: AtomicBool,
}

impl ReentrancyLock {
    /// Creates an unlocked guard for `operation`.
    #[must_use]
    pub const fn new(operation: &'static str) -> Self {
        Self {
            operation,
            entered: AtomicBool::new(false),
        }
    }

    /// Name of the guarded operation.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Returns true while the operation is running.
    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered.load(Ordering::SeqCst)
    }

    /// Enters the operation. Returns `None` if it is already running.
    #[must_use]
    pub fn enter(&self) -> Option<ReentrancyGuard<'_>> {
        if self
            .entered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Some(ReentrancyGuard { lock: self })
        } else {
            None
        }
    }
}

/// Held while a guarded operation runs; releases the lock on drop.
#[derive(Debug)]
pub struct ReentrancyGuard<'a> {
    lock: &'a ReentrancyLock,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.lock.entered.store(false, Ordering::SeqCst);
    }
}
