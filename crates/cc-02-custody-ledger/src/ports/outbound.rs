//! # Driven Ports (SPI - Outbound)
//!
//! Dependencies the Ledger calls out to.
//!
//! | Port | Implemented by |
//! |------|----------------|
//! | `CommitmentVerifier` | every `AuthorizationRegistryApi` (see `adapters/registry.rs`) |
//! | `TransferExecutor` | `InMemoryTransfers` (see `adapters/transfer.rs`) |

use crate::domain::TransferError;
use cc_01_authorization_registry::RegistryError;
use shared_types::{Address, AuthorizationClaim, Commitment, ExecutionSubstrate, U256};
use std::sync::Arc;

/// Verifies and consumes commitments on behalf of a Ledger.
pub trait CommitmentVerifier: Send + Sync {
    /// Identity of the verifying Registry.
    fn verifier_identity(&self) -> Address;

    /// Substrate the verifier runs in. A Ledger only binds a verifier that
    /// shares its own substrate, so a failed debit also undoes the consumption.
    fn verifier_substrate(&self) -> &Arc<ExecutionSubstrate>;

    /// Accepts `commitment` for `claim` exactly once.
    fn consume(&self, claim: &AuthorizationClaim, commitment: Commitment)
        -> Result<(), RegistryError>;
}

/// Moves released funds to a recipient.
///
/// Runs after the Ledger has already reduced its balance. An implementation
/// may hand control to recipient code, which may call back into the Ledger
/// before `transfer` returns.
pub trait TransferExecutor: Send + Sync {
    /// Delivers `amount` to `recipient`.
    fn transfer(&self, recipient: Address, amount: U256) -> Result<(), TransferError>;
}
