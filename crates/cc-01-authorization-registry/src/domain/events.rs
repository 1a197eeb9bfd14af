//! # Registry Events
//!
//! Audit events emitted by the Registry. One per successful state change.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Commitment, U256};

/// Event emitted by the Authorization Registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// The registry was bound to its owner.
    Initialized {
        /// Owner identity.
        owner: Address,
    },
    /// A commitment was verified and permanently consumed.
    Consumed {
        /// Ledger the authorization was issued for.
        ledger: Address,
        /// Recipient of the released funds.
        recipient: Address,
        /// Authorized amount.
        amount: U256,
        /// The consumed commitment.
        commitment: Commitment,
    },
}
