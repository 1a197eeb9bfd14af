//! # Driving Ports (API - Inbound)
//!
//! The capability surface of the Authorization Registry. Ledgers, the
//! bootstrap and the request handler all talk to the Registry through this
//! trait.

use crate::domain::RegistryError;
use shared_types::{Address, AuthorizationClaim, Commitment, ExecutionSubstrate};
use std::sync::Arc;

/// Single-use commitment verification.
pub trait AuthorizationRegistryApi: Send + Sync {
    /// Identity of this Registry instance.
    fn identity(&self) -> Address;

    /// The substrate every operation of this Registry runs in.
    ///
    /// A caller whose own operation must roll back the Registry's effects has
    /// to run in this same substrate.
    fn substrate(&self) -> &Arc<ExecutionSubstrate>;

    /// Binds the owner. Succeeds exactly once.
    fn initialize(&self, caller: Address) -> Result<(), RegistryError>;

    /// Deterministic commitment for `claim` under the ambient network id.
    fn compute_commitment(&self, claim: &AuthorizationClaim) -> Commitment;

    /// Checks `commitment` against `claim` and consumes it on success.
    ///
    /// Check order: reentrancy, initialization, parameters, prior
    /// consumption, digest equality.
    fn verify(&self, claim: &AuthorizationClaim, commitment: Commitment)
        -> Result<(), RegistryError>;

    /// Returns true if `commitment` was consumed. Callable before `initialize`.
    fn is_consumed(&self, commitment: &Commitment) -> bool;

    /// Returns true once `initialize` succeeded.
    fn is_initialized(&self) -> bool;

    /// Owner bound by `initialize`, if any.
    fn owner(&self) -> Option<Address>;
}
