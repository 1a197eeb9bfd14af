//! # Custody-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deployments on a fixed clock, identities, authorizations
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── reentrancy.rs # Recipient code calling back during the transfer
//! │   └── replay.rs     # Reusing commitments across ledgers and networks
//! │
//! └── integration/      # Cross-crate behavior
//!     ├── scenarios.rs  # End-to-end deposit and release flows
//!     └── properties.rs # Property-based invariants (proptest)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cc-tests
//!
//! # By category
//! cargo test -p cc-tests integration::
//! cargo test -p cc-tests exploits::
//! ```

pub mod fixtures;
pub mod integration;
