//! # Commitment Issuer
//!
//! The trusted off-channel party that hands out `(commitment, nonce)` pairs.
//! It computes commitments with the same function the Registry uses, under
//! the same network id, so a Registry in that network accepts them.

use cc_02_custody_ledger::DebitRequest;
use parking_lot::Mutex;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use shared_types::{compute_commitment, Address, AuthorizationClaim, Commitment, NetworkId, U256};
use tracing::{debug, warn};

/// How the issuer picks nonces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NonceStrategy {
    /// 1, 2, 3, ...
    #[default]
    Sequential,
    /// 256 random bits per authorization.
    Random,
}

/// A commitment together with the claim it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedAuthorization {
    /// The authorized claim.
    pub claim: AuthorizationClaim,
    /// `keccak256` of the claim under the issuer's network id.
    pub commitment: Commitment,
}

impl IssuedAuthorization {
    /// The debit that redeems this authorization.
    #[must_use]
    pub fn debit_request(&self) -> DebitRequest {
        DebitRequest::new(
            self.claim.recipient,
            self.claim.amount,
            self.commitment,
            self.claim.nonce,
        )
    }
}

/// Issues commitments for one network.
#[derive(Debug)]
pub struct CommitmentIssuer {
    network_id: NetworkId,
    strategy: NonceStrategy,
    next_nonce: Mutex<U256>,
}

impl CommitmentIssuer {
    /// Creates an issuer for `network_id`.
    #[must_use]
    pub fn new(network_id: NetworkId, strategy: NonceStrategy) -> Self {
        Self {
            network_id,
            strategy,
            next_nonce: Mutex::new(U256::one()),
        }
    }

    /// Network id folded into issued commitments.
    #[must_use]
    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    /// Issues an authorization with a fresh nonce.
    pub fn issue(&self, ledger: Address, recipient: Address, amount: U256) -> IssuedAuthorization {
        let nonce = self.next_nonce();
        self.issue_with_nonce(ledger, recipient, amount, nonce)
    }

    /// Issues an authorization with a caller-chosen nonce.
    pub fn issue_with_nonce(
        &self,
        ledger: Address,
        recipient: Address,
        amount: U256,
        nonce: U256,
    ) -> IssuedAuthorization {
        let claim = AuthorizationClaim::new(ledger, recipient, amount, nonce);
        let commitment = compute_commitment(&claim, self.network_id);
        debug!(%ledger, %recipient, %amount, %nonce, %commitment, "authorization issued");
        IssuedAuthorization { claim, commitment }
    }

    fn next_nonce(&self) -> U256 {
        match self.strategy {
            NonceStrategy::Sequential => {
                let mut next = self.next_nonce.lock();
                let nonce = *next;
                let (following, wrapped) = nonce.overflowing_add(U256::one());
                if wrapped {
                    warn!(network_id = %self.network_id, "sequential nonce space exhausted, wrapping to zero");
                }
                *next = following;
                nonce
            }
            NonceStrategy::Random => {
                let mut bytes = [0u8; 32];
                rand::thread_rng().fill_bytes(&mut bytes);
                U256::from_big_endian(&bytes)
            }
        }
    }
}
