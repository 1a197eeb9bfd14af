//! # Driving Ports (API - Inbound)
//!
//! The capability surface of the Custody Ledger.

use crate::domain::LedgerError;
use crate::ports::outbound::CommitmentVerifier;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Commitment, U256};
use std::sync::Arc;

/// Arguments of a `debit`: who receives how much, against which commitment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitRequest {
    /// Recipient of the released funds.
    pub recipient: Address,
    /// Amount to release.
    pub amount: U256,
    /// Commitment issued for `(ledger, recipient, amount, nonce)`.
    pub commitment: Commitment,
    /// Nonce the commitment was issued with.
    pub nonce: U256,
}

impl DebitRequest {
    /// Creates a debit request.
    #[must_use]
    pub const fn new(recipient: Address, amount: U256, commitment: Commitment, nonce: U256) -> Self {
        Self {
            recipient,
            amount,
            commitment,
            nonce,
        }
    }
}

/// Pooled custody with authorization-gated release.
pub trait CustodyLedgerApi: Send + Sync {
    /// Identity of this Ledger instance.
    fn identity(&self) -> Address;

    /// Binds the owner and the Registry. Succeeds exactly once.
    fn initialize(
        &self,
        caller: Address,
        registry: Arc<dyn CommitmentVerifier>,
    ) -> Result<(), LedgerError>;

    /// Deposits `amount` from `source`. Returns the new pooled balance.
    fn credit(&self, source: Address, amount: U256) -> Result<U256, LedgerError>;

    /// Releases funds against a single-use commitment. Returns the pooled
    /// balance after the release.
    fn debit(&self, request: &DebitRequest) -> Result<U256, LedgerError>;

    /// Current pooled balance.
    fn balance(&self) -> U256;

    /// Returns true once `initialize` succeeded.
    fn is_initialized(&self) -> bool;

    /// Owner bound by `initialize`, if any.
    fn owner(&self) -> Option<Address>;

    /// Identity of the bound Registry, if any.
    fn registry_identity(&self) -> Option<Address>;
}
