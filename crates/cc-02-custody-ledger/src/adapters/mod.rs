//! # Adapters Layer
//!
//! - `registry`: Authorization Registry as the commitment verifier
//! - `transfer`: in-memory transfer effect with recipient hooks

pub mod registry;
pub mod transfer;

pub use transfer::{recipient_hook, InMemoryTransfers, Payout, RecipientHook};
