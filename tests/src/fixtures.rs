//! # Test Fixtures
//!
//! Every fixture builds its own substrate, Registry and Ledger; nothing is
//! shared between tests.

use cc_01_authorization_registry::AuthorizationRegistry;
use cc_02_custody_ledger::{
    CustodyLedger, CustodyLedgerApi, DebitRequest, InMemoryTransfers, LedgerConfig,
};
use custody_runtime::{CommitmentIssuer, Deployment, NonceStrategy, RuntimeConfig};
use shared_types::{Address, FixedClock, NetworkId, U256};
use std::sync::Arc;

/// Timestamp every fixture clock starts at.
pub const GENESIS_TIME: u64 = 1_700_000_000;

/// Default network of the fixtures.
pub const NETWORK: NetworkId = NetworkId(1);

/// Shorthand for small amounts and nonces.
#[must_use]
pub fn u(n: u64) -> U256 {
    U256::from(n)
}

/// A user identity.
#[must_use]
pub fn user(n: u64) -> Address {
    Address::from_low_u64(0x5000 + n)
}

/// A depositor identity.
#[must_use]
pub fn depositor() -> Address {
    Address::from_low_u64(0xD0)
}

/// A fully bootstrapped deployment plus an issuer for its network.
pub struct TestDeployment {
    /// The deployment under test.
    pub deployment: Deployment,
    /// Clock driving audit timestamps.
    pub clock: Arc<FixedClock>,
    /// Issuer sharing the deployment's network id.
    pub issuer: CommitmentIssuer,
}

impl TestDeployment {
    /// Default configuration on [`NETWORK`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Default configuration with the given Ledger settings.
    #[must_use]
    pub fn with_ledger_config(ledger: LedgerConfig) -> Self {
        Self::with_config(RuntimeConfig {
            ledger,
            ..RuntimeConfig::default()
        })
    }

    /// Default configuration on another network.
    #[must_use]
    pub fn on_network(network_id: u64) -> Self {
        let mut config = RuntimeConfig::default();
        config.network.network_id = network_id;
        Self::with_config(config)
    }

    /// Bootstraps `config` on a fixed clock.
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        let clock = Arc::new(FixedClock::new(GENESIS_TIME));
        let deployment = Deployment::launch_with_clock(&config, clock.clone())
            .expect("fixture configuration is valid");
        let issuer = CommitmentIssuer::new(config.network.id(), NonceStrategy::Sequential);
        Self {
            deployment,
            clock,
            issuer,
        }
    }

    /// The Ledger.
    #[must_use]
    pub fn ledger(&self) -> &Arc<CustodyLedger> {
        self.deployment.ledger()
    }

    /// The Registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<AuthorizationRegistry> {
        self.deployment.registry()
    }

    /// The transfer effect.
    #[must_use]
    pub fn transfers(&self) -> &Arc<InMemoryTransfers> {
        self.deployment.transfers()
    }

    /// Deposits `amount` from the fixture depositor.
    pub fn fund(&self, amount: u64) -> U256 {
        self.ledger()
            .credit(depositor(), u(amount))
            .expect("open credit policy admits the depositor")
    }

    /// A valid debit for this deployment's Ledger.
    #[must_use]
    pub fn authorize(&self, recipient: Address, amount: u64, nonce: u64) -> DebitRequest {
        self.authorize_for(self.ledger().identity(), recipient, amount, nonce)
    }

    /// A debit whose commitment was issued for `ledger`.
    #[must_use]
    pub fn authorize_for(
        &self,
        ledger: Address,
        recipient: Address,
        amount: u64,
        nonce: u64,
    ) -> DebitRequest {
        self.issuer
            .issue_with_nonce(ledger, recipient, u(amount), u(nonce))
            .debit_request()
    }
}

impl Default for TestDeployment {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of everything a rejected call must leave untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observed {
    /// Pooled balance.
    pub balance: U256,
    /// Consumed commitments.
    pub consumed: usize,
    /// Registry audit records.
    pub registry_records: usize,
    /// Ledger audit records.
    pub ledger_records: usize,
    /// Delivered payouts.
    pub payouts: usize,
}

impl TestDeployment {
    /// Captures the observable state.
    #[must_use]
    pub fn observe(&self) -> Observed {
        Observed {
            balance: self.ledger().balance(),
            consumed: self.registry().consumed_count(),
            registry_records: self.registry().audit_trail().len(),
            ledger_records: self.ledger().audit_trail().len(),
            payouts: self.transfers().payouts().len(),
        }
    }
}
