//! # Ports Layer
//!
//! The Registry has no driven ports: it never calls out of itself.

pub mod inbound;

pub use inbound::*;
