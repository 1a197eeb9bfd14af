//! # Domain Layer (Inner Hexagon)
//!
//! Registry state, events and errors. No I/O.

pub mod entities;
pub mod errors;
pub mod events;

pub use entities::*;
pub use errors::*;
pub use events::*;
