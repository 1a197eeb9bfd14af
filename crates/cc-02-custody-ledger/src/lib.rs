//! # CC-02 Custody Ledger - Pooled Funds, Authorization-Gated Release
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Holds a single pooled balance. Anyone may deposit; funds leave only against
//! a single-use commitment that the bound Authorization Registry verifies and
//! consumes.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Balance conservation | `service.rs` - checked add on credit, checked subtract on debit |
//! | No release without consumption | `service.rs` - `registry.consume` precedes the decrement |
//! | Mutate before effect | `service.rs` - balance and event committed before `transfer` |
//! | Rejection is a no-op | `ExecutionSubstrate::atomic` rolls back every failed call |
//! | Non-reentrant debit | `service.rs` - `debit_lock`, switchable via `LedgerConfig` |
//!
//! ## Outbound Dependencies
//!
//! | Dependency | Trait | Purpose |
//! |------------|-------|---------|
//! | Authorization Registry (1) | `CommitmentVerifier` | Verify and consume commitments |
//! | Transfer effect | `TransferExecutor` | Deliver released funds |
//!
//! ## Failure Kinds
//!
//! | Operation | Kinds |
//! |-----------|-------|
//! | `initialize` | `AlreadyInitialized`, `InvalidParameters` |
//! | `credit` | `NotInitialized`, `CreditNotPermitted`, `BalanceOverflow` |
//! | `debit` | `ReentrantCall`, `NotInitialized`, `InvalidParameters`, `InsufficientFunds`, `AuthorizationRejected`, `TransferFailed` |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{recipient_hook, InMemoryTransfers, Payout, RecipientHook};
pub use config::LedgerConfig;
pub use domain::{
    AllowListCreditPolicy, CreditPolicy, LedgerError, LedgerEvent, LedgerState,
    OpenCreditPolicy, TransferError,
};
pub use ports::{CommitmentVerifier, CustodyLedgerApi, DebitRequest, TransferExecutor};
pub use service::CustodyLedger;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::LedgerConfig;
    pub use crate::domain::{LedgerError, LedgerEvent, TransferError};
    pub use crate::ports::{CommitmentVerifier, CustodyLedgerApi, DebitRequest, TransferExecutor};
    pub use crate::service::CustodyLedger;
}
