//! # Domain Errors
//!
//! Rejection causes for Registry operations.

use shared_types::{Address, Commitment, ParameterFault, RejectionKind};
use thiserror::Error;

/// Errors returned by the Authorization Registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// `verify` called before `initialize`.
    #[error("registry not initialized")]
    NotInitialized,

    /// `initialize` called a second time.
    #[error("registry already initialized by {owner}")]
    AlreadyInitialized {
        /// The owner bound by the first call.
        owner: Address,
    },

    /// A structural constraint on the claim does not hold.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterFault),

    /// The commitment was already consumed.
    #[error("commitment already consumed: {0}")]
    AlreadyConsumed(Commitment),

    /// The claim does not hash to the presented commitment.
    #[error("commitment mismatch: supplied {supplied}, recomputed {expected}")]
    ParameterMismatch {
        /// Commitment recomputed from the claim.
        expected: Commitment,
        /// Commitment presented by the caller.
        supplied: Commitment,
    },

    /// `verify` re-entered while already running on this registry.
    #[error("reentrant call into {0}")]
    ReentrantCall(&'static str),
}

impl RegistryError {
    /// The inspectable kind of this rejection.
    #[must_use]
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::NotInitialized => RejectionKind::NotInitialized,
            Self::AlreadyInitialized { .. } => RejectionKind::AlreadyInitialized,
            Self::InvalidParameters(_) => RejectionKind::InvalidParameters,
            Self::AlreadyConsumed(_) => RejectionKind::AlreadyConsumed,
            Self::ParameterMismatch { .. } => RejectionKind::ParameterMismatch,
            Self::ReentrantCall(_) => RejectionKind::ReentrantCall,
        }
    }
}
