//! # Ledger Events
//!
//! One event per successful state change of the Ledger.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Commitment, U256};

/// Event emitted by the Custody Ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Owner and Registry bound.
    Initialized {
        /// Owner identity.
        owner: Address,
        /// Identity of the bound Registry.
        registry: Address,
    },
    /// Funds deposited into the pool.
    Credited {
        /// Depositing identity.
        source: Address,
        /// Deposited amount.
        amount: U256,
        /// Pooled balance after the deposit.
        new_balance: U256,
    },
    /// Funds released against a consumed commitment.
    Debited {
        /// Recipient of the funds.
        recipient: Address,
        /// Released amount.
        amount: U256,
        /// Commitment that authorized the release.
        commitment: Commitment,
        /// Pooled balance after the release.
        new_balance: U256,
    },
}
