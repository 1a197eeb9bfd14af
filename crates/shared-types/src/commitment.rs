//! # Authorization Commitments
//!
//! A commitment is the keccak-256 digest binding one
//! `(ledger, recipient, amount, nonce, network)` tuple. The Registry recomputes
//! it on every verify; the off-channel issuer computes it with this same
//! function. Any divergence in the preimage layout breaks every authorization,
//! so the layout is fixed here:
//!
//! ```text
//! offset  size  field
//! 0       20    ledger identity
//! 20      20    recipient
//! 40      32    amount   (U256, big-endian)
//! 72      32    nonce    (U256, big-endian)
//! 104     32    network  (u64 widened to 32 bytes, big-endian)
//! ```

use crate::errors::{ParameterFault, ParseHexError};
use crate::value_objects::{decode_fixed, u256_to_be_bytes, Address, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Length of the packed commitment preimage.
pub const COMMITMENT_PREIMAGE_LEN: usize = 20 + 20 + 32 + 32 + 32;

// =============================================================================
// NETWORK ID
// =============================================================================

/// Identifier of the execution context a deployment runs in.
///
/// Folded into every commitment so an authorization issued for one network
/// can never be replayed on another, otherwise identical, deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(pub u64);

impl NetworkId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Big-endian 32-byte encoding used in the preimage.
    #[must_use]
    pub fn to_word(self) -> [u8; 32] {
        u256_to_be_bytes(U256::from(self.0))
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// COMMITMENT (32 bytes)
// =============================================================================

/// Opaque 32-byte authorization digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Commitment(pub [u8; 32]);

impl Commitment {
    /// Creates a commitment from raw digest bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[28..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for Commitment {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Commitment {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<32>(s).map(Self)
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{self:?}"))
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// AUTHORIZATION CLAIM
// =============================================================================

/// The parameters a caller claims a commitment was issued for.
///
/// A claim is never trusted on its own: the Registry hashes it and compares
/// the result against the presented commitment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizationClaim {
    /// Identity of the ledger releasing the funds.
    pub ledger: Address,
    /// Identity receiving the funds.
    pub recipient: Address,
    /// Amount to release.
    pub amount: U256,
    /// Caller-chosen uniqueness value.
    pub nonce: U256,
}

impl AuthorizationClaim {
    /// Creates a claim.
    #[must_use]
    pub const fn new(ledger: Address, recipient: Address, amount: U256, nonce: U256) -> Self {
        Self {
            ledger,
            recipient,
            amount,
            nonce,
        }
    }

    /// Checks the structural constraints: non-null identities and a positive
    /// amount.
    pub fn validate(&self) -> Result<(), ParameterFault> {
        if self.ledger.is_zero() {
            return Err(ParameterFault::NullLedger);
        }
        if self.recipient.is_zero() {
            return Err(ParameterFault::NullRecipient);
        }
        if self.amount.is_zero() {
            return Err(ParameterFault::ZeroAmount);
        }
        Ok(())
    }

    /// Computes the commitment for this claim on `network`.
    #[must_use]
    pub fn commitment(&self, network: NetworkId) -> Commitment {
        compute_commitment(self, network)
    }
}

// =============================================================================
// HASHING
// =============================================================================

/// Packs a claim and network id into the fixed preimage layout.
#[must_use]
pub fn encode_preimage(
    claim: &AuthorizationClaim,
    network: NetworkId,
) -> [u8; COMMITMENT_PREIMAGE_LEN] {
    let mut preimage = [0u8; COMMITMENT_PREIMAGE_LEN];
    preimage[0..20].copy_from_slice(claim.ledger.as_bytes());
    preimage[20..40].copy_from_slice(claim.recipient.as_bytes());
    preimage[40..72].copy_from_slice(&u256_to_be_bytes(claim.amount));
    preimage[72..104].copy_from_slice(&u256_to_be_bytes(claim.nonce));
    preimage[104..136].copy_from_slice(&network.to_word());
    preimage
}

/// Computes `keccak256(ledger ‖ recipient ‖ amount ‖ nonce ‖ network)`.
///
/// Pure and deterministic.
#[must_use]
pub fn compute_commitment(claim: &AuthorizationClaim, network: NetworkId) -> Commitment {
    let digest = Keccak256::digest(encode_preimage(claim, network));
    Commitment(digest.into())
}

// =============================================================================
// TESTS
// =============================================================================
