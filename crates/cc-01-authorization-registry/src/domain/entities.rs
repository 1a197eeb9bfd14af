//! # Core Domain Entities
//!
//! Registry state: the owner binding and the consumed set.

use shared_types::{Address, Commitment};
use std::collections::HashSet;

/// Mutable state owned by one Registry instance.
///
/// The consumed set only holds digests. A commitment that is absent is either
/// unknown or issued-but-unspent; the Registry does not distinguish the two.
#[derive(Debug, Default, Clone)]
pub struct RegistryState {
    /// Identity bound by `initialize`.
    pub owner: Option<Address>,
    /// Commitments that have been consumed.
    pub consumed: HashSet<Commitment>,
}

impl RegistryState {
    /// Returns true once `initialize` succeeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.owner.is_some()
    }

    /// Returns true if `commitment` was consumed.
    #[must_use]
    pub fn is_consumed(&self, commitment: &Commitment) -> bool {
        self.consumed.contains(commitment)
    }

    /// Number of consumed commitments.
    #[must_use]
    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }
}
