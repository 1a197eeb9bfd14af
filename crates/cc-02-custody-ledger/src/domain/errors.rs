//! # Domain Errors
//!
//! Rejection causes for Ledger operations and transfer effects.

use cc_01_authorization_registry::RegistryError;
use shared_types::{Address, ParameterFault, RejectionKind, U256};
use thiserror::Error;

/// Failure of the transfer effect that moves released funds to a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The recipient does not accept funds.
    #[error("recipient {0} refused the transfer")]
    Refused(Address),

    /// Code run by the recipient on receipt failed.
    #[error("recipient hook failed: {0}")]
    Hook(String),
}

impl TransferError {
    /// Transfer failures always surface as `TransferFailed`.
    #[must_use]
    pub fn kind(&self) -> RejectionKind {
        RejectionKind::TransferFailed
    }
}

/// Errors returned by the Custody Ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Operation called before `initialize`.
    #[error("ledger not initialized")]
    NotInitialized,

    /// `initialize` called a second time.
    #[error("ledger already initialized by {owner}")]
    AlreadyInitialized {
        /// Owner bound by the first call.
        owner: Address,
    },

    /// A structural constraint on the arguments does not hold.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterFault),

    /// The debit exceeds the pooled balance.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Requested debit amount.
        requested: U256,
        /// Pooled balance at the time of the check.
        available: U256,
    },

    /// The Registry refused the authorization.
    #[error("authorization rejected: {0}")]
    AuthorizationRejected(#[source] RegistryError),

    /// The transfer effect failed; the whole debit was rolled back.
    #[error("transfer of {amount} to {recipient} failed")]
    TransferFailed {
        /// Intended recipient.
        recipient: Address,
        /// Intended amount.
        amount: U256,
        /// Why the effect failed.
        #[source]
        reason: TransferError,
    },

    /// The operation was re-entered while already running on this Ledger.
    #[error("reentrant call into {0}")]
    ReentrantCall(&'static str),

    /// The credit policy denied the depositor.
    #[error("credit from {depositor} not permitted")]
    CreditNotPermitted {
        /// Depositing identity.
        depositor: Address,
    },

    /// The credit would overflow the 256-bit balance.
    #[error("balance overflow: {balance} + {amount}")]
    BalanceOverflow {
        /// Pooled balance before the credit.
        balance: U256,
        /// Credited amount.
        amount: U256,
    },
}

impl LedgerError {
    /// The inspectable kind of this rejection.
    #[must_use]
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::NotInitialized => RejectionKind::NotInitialized,
            Self::AlreadyInitialized { .. } => RejectionKind::AlreadyInitialized,
            Self::InvalidParameters(_) => RejectionKind::InvalidParameters,
            Self::InsufficientFunds { .. } => RejectionKind::InsufficientFunds,
            Self::AuthorizationRejected(_) => RejectionKind::AuthorizationRejected,
            Self::TransferFailed { .. } => RejectionKind::TransferFailed,
            Self::ReentrantCall(_) => RejectionKind::ReentrantCall,
            Self::CreditNotPermitted { .. } => RejectionKind::CreditNotPermitted,
            Self::BalanceOverflow { .. } => RejectionKind::BalanceOverflow,
        }
    }

    /// The Registry's rejection kind when the authorization was refused.
    #[must_use]
    pub fn authorization_cause(&self) -> Option<RejectionKind> {
        match self {
            Self::AuthorizationRejected(cause) => Some(cause.kind()),
            _ => None,
        }
    }
}
