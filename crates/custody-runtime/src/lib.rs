//! # Custody Runtime
//!
//! Deployment wiring for the custody subsystems.
//!
//! ## Modules
//!
//! - `config/` - defaults and `CC_*` environment overrides
//! - `bootstrap/` - substrate, Registry and Ledger in dependency order
//! - `issuer/` - off-channel commitment issuance
//! - `handler/` - JSON request surface served by `custody-node`
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then environment)
//! 2. Validate identities and network id
//! 3. Create the execution substrate
//! 4. Initialize the Authorization Registry
//! 5. Bind the Custody Ledger to the initialized Registry
//! 6. Serve requests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bootstrap;
pub mod config;
pub mod handler;
pub mod issuer;

pub use bootstrap::{bind_ledger, BootstrapError, Deployment, DeploymentStatus};
pub use config::{ConfigError, IdentityConfig, NetworkConfig, RuntimeConfig};
pub use handler::{
    HandlerStats, Outcome, Request, RequestEnvelope, RequestHandler, Response, ResponseEnvelope,
};
pub use issuer::{CommitmentIssuer, IssuedAuthorization, NonceStrategy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
