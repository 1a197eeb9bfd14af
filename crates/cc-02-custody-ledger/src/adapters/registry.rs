//! # Registry Adapter
//!
//! Any Authorization Registry serves as the Ledger's commitment verifier.

use crate::ports::outbound::CommitmentVerifier;
use cc_01_authorization_registry::{AuthorizationRegistryApi, RegistryError};
use shared_types::{Address, AuthorizationClaim, Commitment, ExecutionSubstrate};
use std::sync::Arc;

impl<R> CommitmentVerifier for R
where
    R: AuthorizationRegistryApi + ?Sized,
{
    fn verifier_identity(&self) -> Address {
        self.identity()
    }

    fn verifier_substrate(&self) -> &Arc<ExecutionSubstrate> {
        self.substrate()
    }

    fn consume(
        &self,
        claim: &AuthorizationClaim,
        commitment: Commitment,
    ) -> Result<(), RegistryError> {
        self.verify(claim, commitment)
    }
}
