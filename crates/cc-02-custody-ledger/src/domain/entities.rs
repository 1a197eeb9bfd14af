//! # Core Domain Entities

use crate::ports::outbound::CommitmentVerifier;
use shared_types::{Address, U256};
use std::fmt;
use std::sync::Arc;

/// Mutable state owned by one Ledger instance.
#[derive(Default)]
pub struct LedgerState {
    /// Identity bound by `initialize`.
    pub owner: Option<Address>,
    /// Registry bound by `initialize`.
    pub registry: Option<Arc<dyn CommitmentVerifier>>,
    /// Pooled balance.
    pub total_balance: U256,
}

impl LedgerState {
    /// Returns true once `initialize` succeeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.owner.is_some() && self.registry.is_some()
    }

    /// Identity of the bound Registry.
    #[must_use]
    pub fn registry_identity(&self) -> Option<Address> {
        self.registry.as_ref().map(|r| r.verifier_identity())
    }
}

impl fmt::Debug for LedgerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerState")
            .field("owner", &self.owner)
            .field("registry", &self.registry_identity())
            .field("total_balance", &self.total_balance)
            .finish()
    }
}
