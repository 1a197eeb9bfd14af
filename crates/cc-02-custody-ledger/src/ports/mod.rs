//! # Ports Layer
//!
//! - `inbound`: the Ledger API
//! - `outbound`: Registry verification and the transfer effect

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
