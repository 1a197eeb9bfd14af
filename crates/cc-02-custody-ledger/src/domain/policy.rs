//! # Credit Policy
//!
//! Capability check applied to every deposit. The default policy admits any
//! depositor; the check still runs so that a restrictive policy can be swapped
//! in without touching the Ledger.

use shared_types::{Address, U256};
use std::collections::HashSet;

/// Decides whether a deposit is admitted.
pub trait CreditPolicy: Send + Sync {
    /// Returns true if `source` may deposit `amount`.
    fn permits(&self, source: Address, amount: U256) -> bool;
}

/// Admits every depositor.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCreditPolicy;

impl CreditPolicy for OpenCreditPolicy {
    fn permits(&self, _source: Address, _amount: U256) -> bool {
        true
    }
}

/// Admits only listed depositors.
#[derive(Debug, Clone, Default)]
pub struct AllowListCreditPolicy {
    allowed: HashSet<Address>,
}

impl AllowListCreditPolicy {
    /// Creates a policy admitting exactly `allowed`.
    #[must_use]
    pub fn new(allowed: impl IntoIterator<Item = Address>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

impl CreditPolicy for AllowListCreditPolicy {
    fn permits(&self, source: Address, _amount: U256) -> bool {
        self.allowed.contains(&source)
    }
}
