//! # CC-01 Authorization Registry - Single-Use Commitment Verification
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Holds the set of consumed authorization commitments. A Ledger presents a
//! claim `(ledger, recipient, amount, nonce)` with a commitment; the Registry
//! recomputes the digest under the ambient network id, and on a match marks
//! the commitment consumed so it can never be redeemed again.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Single consumption | `service.rs` - consumed check before acceptance |
//! | Parameter binding | `service.rs` - recomputed digest must equal the presented one |
//! | Rejection is a no-op | `ExecutionSubstrate::atomic` rolls back every failed verify |
//! | Initialize once | `service.rs` - `AlreadyInitialized` on a second call |
//!
//! ## Operations
//!
//! | Operation | Kind | Failure kinds |
//! |-----------|------|---------------|
//! | `initialize` | state change | `AlreadyInitialized`, `InvalidParameters` |
//! | `verify` | state change | `ReentrantCall`, `NotInitialized`, `InvalidParameters`, `AlreadyConsumed`, `ParameterMismatch` |
//! | `compute_commitment` | pure | none |
//! | `is_consumed` / `is_initialized` / `owner` | query | none |
//!
//! ## Usage
//!
//! ```
//! use cc_01_authorization_registry::prelude::*;
//! use shared_types::{Address, AuthorizationClaim, ExecutionSubstrate, NetworkId, U256};
//! use std::sync::Arc;
//!
//! let substrate = Arc::new(ExecutionSubstrate::new(NetworkId(1)));
//! let registry = AuthorizationRegistry::new(Address::from_low_u64(0xA0), substrate);
//! registry.initialize(Address::from_low_u64(0x0B)).unwrap();
//!
//! let claim = AuthorizationClaim::new(
//!     Address::from_low_u64(0x1E),
//!     Address::from_low_u64(0x01),
//!     U256::from(4u64),
//!     U256::from(1u64),
//! );
//! let commitment = registry.compute_commitment(&claim);
//! registry.verify(&claim, commitment).unwrap();
//! assert!(registry.is_consumed(&commitment));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{RegistryError, RegistryEvent, RegistryState};
pub use ports::AuthorizationRegistryApi;
pub use service::AuthorizationRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::domain::{RegistryError, RegistryEvent};
    pub use crate::ports::AuthorizationRegistryApi;
    pub use crate::service::AuthorizationRegistry;
}
