//! # Domain Layer (Inner Hexagon)
//!
//! Ledger state, events, errors and the credit policy.

pub mod entities;
pub mod errors;
pub mod events;
pub mod policy;

pub use entities::*;
pub use errors::*;
pub use events::*;
pub use policy::*;
