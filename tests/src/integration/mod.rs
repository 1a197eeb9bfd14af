//! # Integration Tests
//!
//! Cross-crate behavior of a bootstrapped deployment.
//!
//! - `scenarios`: deposit and release flows
//! - `properties`: invariants under randomized input

pub mod properties;
