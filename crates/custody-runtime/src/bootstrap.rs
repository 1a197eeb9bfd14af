//! # Deployment Bootstrap
//!
//! Builds a deployment in dependency order:
//!
//! 1. Validate configuration
//! 2. Create the execution substrate (network id, clock)
//! 3. Create and initialize the Authorization Registry
//! 4. Create the Custody Ledger and bind it to the initialized Registry
//!
//! A Ledger is never bound to a Registry that has not been initialized, nor
//! to one running in another substrate.

use crate::config::{ConfigError, RuntimeConfig};
use cc_01_authorization_registry::{AuthorizationRegistry, AuthorizationRegistryApi, RegistryError};
use cc_02_custody_ledger::{
    CustodyLedger, CustodyLedgerApi, InMemoryTransfers, LedgerConfig, LedgerError,
};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Clock, ExecutionSubstrate, NetworkId, RejectionKind, SystemClock, U256};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors raised while assembling a deployment.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The configuration is unusable.
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),

    /// Registry initialization failed.
    #[error("registry setup failed: {0}")]
    Registry(#[from] RegistryError),

    /// Ledger initialization failed.
    #[error("ledger setup failed: {0}")]
    Ledger(#[from] LedgerError),

    /// The Registry must be initialized before a Ledger binds to it.
    #[error("registry {0} is not initialized")]
    RegistryNotInitialized(Address),
}

impl BootstrapError {
    /// Rejection kind of the underlying failure.
    #[must_use]
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::Config(_) => RejectionKind::InvalidParameters,
            Self::Registry(err) => err.kind(),
            Self::Ledger(err) => err.kind(),
            Self::RegistryNotInitialized(_) => RejectionKind::NotInitialized,
        }
    }
}

/// Binds `ledger` to `registry` on behalf of `operator`.
pub fn bind_ledger<R>(
    ledger: &dyn CustodyLedgerApi,
    operator: Address,
    registry: Arc<R>,
) -> Result<(), BootstrapError>
where
    R: AuthorizationRegistryApi + 'static,
{
    if !registry.is_initialized() {
        return Err(BootstrapError::RegistryNotInitialized(registry.identity()));
    }
    ledger.initialize(operator, registry)?;
    Ok(())
}

/// Snapshot of a running deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    /// Network id folded into commitments.
    pub network_id: NetworkId,
    /// Registry identity.
    pub registry: Address,
    /// Ledger identity.
    pub ledger: Address,
    /// Operator bound to both components.
    pub operator: Option<Address>,
    /// Pooled balance.
    pub balance: U256,
    /// Number of consumed commitments.
    pub consumed: usize,
    /// Whether the Ledger refuses nested debits.
    pub reentrancy_guard: bool,
}

/// One Registry and one Ledger sharing an execution substrate.
#[derive(Debug)]
pub struct Deployment {
    substrate: Arc<ExecutionSubstrate>,
    registry: Arc<AuthorizationRegistry>,
    transfers: Arc<InMemoryTransfers>,
    ledger: Arc<CustodyLedger>,
    operator: Address,
}

impl Deployment {
    /// Builds a deployment on wall-clock time.
    pub fn launch(config: &RuntimeConfig) -> Result<Self, BootstrapError> {
        Self::launch_with_clock(config, Arc::new(SystemClock))
    }

    /// Builds a deployment with an explicit clock.
    pub fn launch_with_clock(
        config: &RuntimeConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, BootstrapError> {
        config.validate()?;
        let ids = config.identities;

        let substrate = Arc::new(ExecutionSubstrate::with_clock(config.network.id(), clock));

        let registry = Arc::new(AuthorizationRegistry::new(ids.registry, Arc::clone(&substrate)));
        registry.initialize(ids.operator)?;

        let transfers = Arc::new(InMemoryTransfers::new(Arc::clone(&substrate)));
        let ledger = Arc::new(
            CustodyLedger::new(ids.ledger, Arc::clone(&substrate), transfers.clone())
                .with_config(config.ledger),
        );
        bind_ledger(ledger.as_ref(), ids.operator, Arc::clone(&registry))?;

        info!(
            network_id = %config.network.network_id,
            registry = %ids.registry,
            ledger = %ids.ledger,
            operator = %ids.operator,
            "deployment ready"
        );

        Ok(Self {
            substrate,
            registry,
            transfers,
            ledger,
            operator: ids.operator,
        })
    }

    /// Creates another Ledger bound to this deployment's Registry.
    pub fn attach_ledger(
        &self,
        identity: Address,
        config: LedgerConfig,
    ) -> Result<Arc<CustodyLedger>, BootstrapError> {
        let ledger = Arc::new(
            CustodyLedger::new(identity, Arc::clone(&self.substrate), self.transfers.clone())
                .with_config(config),
        );
        bind_ledger(ledger.as_ref(), self.operator, Arc::clone(&self.registry))?;
        info!(%identity, registry = %self.registry.identity(), "ledger attached");
        Ok(ledger)
    }

    /// The shared execution substrate.
    #[must_use]
    pub fn substrate(&self) -> &Arc<ExecutionSubstrate> {
        &self.substrate
    }

    /// The Authorization Registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<AuthorizationRegistry> {
        &self.registry
    }

    /// The Custody Ledger.
    #[must_use]
    pub fn ledger(&self) -> &Arc<CustodyLedger> {
        &self.ledger
    }

    /// The transfer effect shared by every Ledger of this deployment.
    #[must_use]
    pub fn transfers(&self) -> &Arc<InMemoryTransfers> {
        &self.transfers
    }

    /// Operator identity.
    #[must_use]
    pub fn operator(&self) -> Address {
        self.operator
    }

    /// Current deployment snapshot.
    #[must_use]
    pub fn status(&self) -> DeploymentStatus {
        self.substrate.observe(|| DeploymentStatus {
            network_id: self.substrate.network_id(),
            registry: self.registry.identity(),
            ledger: self.ledger.identity(),
            operator: self.ledger.owner(),
            balance: self.ledger.balance(),
            consumed: self.registry.consumed_count(),
            reentrancy_guard: self.ledger.config().enforce_reentrancy_guard,
        })
    }
}
