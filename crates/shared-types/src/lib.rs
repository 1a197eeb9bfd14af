//! # Shared Types Crate
//!
//! Types and primitives shared by the Authorization Registry (cc-01) and the
//! Custody Ledger (cc-02).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the commitment preimage layout lives here and
//!   nowhere else, so both components hash byte-for-byte identical input.
//! - **Explicit Substrate**: atomicity, serialization and the ambient network
//!   identifier come from an [`ExecutionSubstrate`] value owned by a deployment,
//!   never from process-wide globals.
//! - **Inspectable Rejections**: every component error maps to a
//!   [`RejectionKind`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audit;
pub mod clock;
pub mod commitment;
pub mod errors;
pub mod execution;
pub mod guard;
pub mod value_objects;

pub use audit::{AuditRecord, EventLog};
pub use clock::{current_timestamp, Clock, FixedClock, SystemClock};
pub use commitment::{
    compute_commitment, encode_preimage, AuthorizationClaim, Commitment, NetworkId,
    COMMITMENT_PREIMAGE_LEN,
};
pub use errors::{ParameterFault, ParseHexError, RejectionKind};
pub use execution::ExecutionSubstrate;
pub use guard::{ReentrancyGuard, ReentrancyLock};
pub use value_objects::{Address, U256};
