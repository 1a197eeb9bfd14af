//! # Error Types
//!
//! Error vocabulary shared across the Registry and the Ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The kind of a rejected operation.
///
/// Every component error reports exactly one kind so callers can branch on
/// the cause without matching crate-specific error enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionKind {
    /// The component has not been initialized yet.
    NotInitialized,
    /// `initialize` was called a second time.
    AlreadyInitialized,
    /// A structural parameter constraint does not hold.
    InvalidParameters,
    /// The commitment has already been consumed.
    AlreadyConsumed,
    /// The supplied commitment does not match the recomputed one.
    ParameterMismatch,
    /// The debit exceeds the pooled balance.
    InsufficientFunds,
    /// The Registry refused the authorization for a debit.
    AuthorizationRejected,
    /// The transfer effect to the recipient did not complete.
    TransferFailed,
    /// An operation was re-entered while still running.
    ReentrantCall,
    /// The credit capability check denied the source.
    CreditNotPermitted,
    /// The credit would overflow the 256-bit balance.
    BalanceOverflow,
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotInitialized => "NotInitialized",
            Self::AlreadyInitialized => "AlreadyInitialized",
            Self::InvalidParameters => "InvalidParameters",
            Self::AlreadyConsumed => "AlreadyConsumed",
            Self::ParameterMismatch => "ParameterMismatch",
            Self::InsufficientFunds => "InsufficientFunds",
            Self::AuthorizationRejected => "AuthorizationRejected",
            Self::TransferFailed => "TransferFailed",
            Self::ReentrantCall => "ReentrantCall",
            Self::CreditNotPermitted => "CreditNotPermitted",
            Self::BalanceOverflow => "BalanceOverflow",
        };
        f.write_str(name)
    }
}

/// Which structural parameter constraint failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ParameterFault {
    /// The ledger identity is the null address.
    #[error("ledger identity is null")]
    NullLedger,

    /// The recipient is the null address.
    #[error("recipient is null")]
    NullRecipient,

    /// The amount is zero.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// The registry reference has a null identity.
    #[error("registry reference is null")]
    NullRegistry,

    /// The initializing caller is the null address.
    #[error("owner identity is null")]
    NullOwner,

    /// The registry runs in a different execution substrate than the caller.
    #[error("registry runs in a foreign execution substrate")]
    ForeignSubstrate,
}

/// Errors from parsing hex-encoded identities and commitments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseHexError {
    /// The input is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded input has the wrong length.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected byte length.
        expected: usize,
        /// Decoded byte length.
        actual: usize,
    },
}

impl From<hex::FromHexError> for ParseHexError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidHex(err.to_string())
    }
}
