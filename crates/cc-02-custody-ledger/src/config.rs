//! # Ledger Configuration

use serde::{Deserialize, Serialize};

/// Per-instance Ledger settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Refuse a `debit` that starts while another `debit` on the same Ledger
    /// is still running.
    ///
    /// Turning this off leaves only the mutate-before-transfer ordering
    /// between a nested debit and the funds.
    pub enforce_reentrancy_guard: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enforce_reentrancy_guard: true,
        }
    }
}

impl LedgerConfig {
    /// Configuration with the debit guard disabled.
    #[must_use]
    pub fn without_reentrancy_guard() -> Self {
        Self {
            enforce_reentrancy_guard: false,
        }
    }
}
