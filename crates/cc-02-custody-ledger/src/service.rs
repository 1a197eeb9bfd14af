//! # Custody Ledger Service
//!
//! Concrete Ledger bound to one execution substrate.
//!
//! ## Debit Ordering
//!
//! ```text
//! guard -> initialized -> parameters -> funds -> registry.consume
//!       -> balance -= amount -> Debited -> transfer effect
//! ```
//!
//! The balance is reduced and the commitment consumed before the transfer
//! effect runs. Recipient code that calls back into `debit` from inside the
//! effect sees both. Any failure after the first mutation rolls back through
//! the substrate, including the Registry's consumption.

use crate::config::LedgerConfig;
use crate::domain::{
    CreditPolicy, LedgerError, LedgerEvent, LedgerState, OpenCreditPolicy,
};
use crate::ports::inbound::{CustodyLedgerApi, DebitRequest};
use crate::ports::outbound::{CommitmentVerifier, TransferExecutor};
use parking_lot::Mutex;
use shared_types::{
    Address, AuditRecord, AuthorizationClaim, EventLog, ExecutionSubstrate, ParameterFault,
    ReentrancyLock, U256,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The Custody Ledger.
pub struct CustodyLedger {
    identity: Address,
    substrate: Arc<ExecutionSubstrate>,
    config: LedgerConfig,
    state: Arc<Mutex<LedgerState>>,
    events: EventLog<LedgerEvent>,
    policy: Arc<dyn CreditPolicy>,
    transfers: Arc<dyn TransferExecutor>,
    debit_lock: ReentrancyLock,
}

impl CustodyLedger {
    /// Creates an uninitialized Ledger with a zero balance, the open credit
    /// policy and the default configuration.
    #[must_use]
    pub fn new(
        identity: Address,
        substrate: Arc<ExecutionSubstrate>,
        transfers: Arc<dyn TransferExecutor>,
    ) -> Self {
        Self {
            identity,
            substrate,
            config: LedgerConfig::default(),
            state: Arc::new(Mutex::new(LedgerState::default())),
            events: EventLog::new(identity),
            policy: Arc::new(OpenCreditPolicy),
            transfers,
            debit_lock: ReentrancyLock::new("debit"),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the credit policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn CreditPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    /// The substrate this Ledger runs in.
    #[must_use]
    pub fn substrate(&self) -> &Arc<ExecutionSubstrate> {
        &self.substrate
    }

    /// Audit records emitted so far.
    #[must_use]
    pub fn audit_trail(&self) -> Vec<AuditRecord<LedgerEvent>> {
        self.substrate.observe(|| self.events.records())
    }

    fn reject(&self, operation: &'static str, err: LedgerError) -> LedgerError {
        warn!(
            ledger = %self.identity,
            operation,
            kind = %err.kind(),
            error = %err,
            "operation rejected"
        );
        err
    }

    /// Overwrites the balance and registers the inverse with the substrate.
    fn set_balance(&self, new_balance: U256) {
        let prior = {
            let mut state = self.state.lock();
            std::mem::replace(&mut state.total_balance, new_balance)
        };
        let state = Arc::clone(&self.state);
        self.substrate.on_rollback(move || {
            state.lock().total_balance = prior;
        });
    }

    fn bound_registry(&self) -> Option<Arc<dyn CommitmentVerifier>> {
        let state = self.state.lock();
        if state.owner.is_none() {
            return None;
        }
        state.registry.clone()
    }
}

impl CustodyLedgerApi for CustodyLedger {
    fn identity(&self) -> Address {
        self.identity
    }

    fn initialize(
        &self,
        caller: Address,
        registry: Arc<dyn CommitmentVerifier>,
    ) -> Result<(), LedgerError> {
        self.substrate.atomic(|| {
            let bound = self.state.lock().owner;
            if let Some(owner) = bound {
                return Err(self.reject(
                    "initialize",
                    LedgerError::AlreadyInitialized { owner },
                ));
            }
            let registry_id = registry.verifier_identity();
            if registry_id.is_zero() {
                return Err(self.reject(
                    "initialize",
                    LedgerError::InvalidParameters(ParameterFault::NullRegistry),
                ));
            }
            if !Arc::ptr_eq(registry.verifier_substrate(), &self.substrate) {
                return Err(self.reject(
                    "initialize",
                    LedgerError::InvalidParameters(ParameterFault::ForeignSubstrate),
                ));
            }
            if caller.is_zero() {
                return Err(self.reject(
                    "initialize",
                    LedgerError::InvalidParameters(ParameterFault::NullOwner),
                ));
            }

            {
                let mut state = self.state.lock();
                state.owner = Some(caller);
                state.registry = Some(registry);
            }
            let state = Arc::clone(&self.state);
            self.substrate.on_rollback(move || {
                let mut state = state.lock();
                state.owner = None;
                state.registry = None;
            });

            self.events.emit(
                &self.substrate,
                LedgerEvent::Initialized {
                    owner: caller,
                    registry: registry_id,
                },
            );
            info!(ledger = %self.identity, owner = %caller, registry = %registry_id, "ledger initialized");
            Ok(())
        })
    }

    fn credit(&self, source: Address, amount: U256) -> Result<U256, LedgerError> {
        self.substrate.atomic(|| {
            if self.bound_registry().is_none() {
                return Err(self.reject("credit", LedgerError::NotInitialized));
            }
            if !self.policy.permits(source, amount) {
                return Err(self.reject(
                    "credit",
                    LedgerError::CreditNotPermitted { depositor: source },
                ));
            }

            let balance = self.state.lock().total_balance;
            let Some(new_balance) = balance.checked_add(amount) else {
                return Err(self.reject(
                    "credit",
                    LedgerError::BalanceOverflow { balance, amount },
                ));
            };
            self.set_balance(new_balance);

            self.events.emit(
                &self.substrate,
                LedgerEvent::Credited {
                    source,
                    amount,
                    new_balance,
                },
            );
            info!(ledger = %self.identity, %source, %amount, %new_balance, "credited");
            Ok(new_balance)
        })
    }

    fn debit(&self, request: &DebitRequest) -> Result<U256, LedgerError> {
        let DebitRequest {
            recipient,
            amount,
            commitment,
            nonce,
        } = *request;

        self.substrate.atomic(|| {
            let _guard = if self.config.enforce_reentrancy_guard {
                match self.debit_lock.enter() {
                    Some(guard) => Some(guard),
                    None => {
                        return Err(self.reject(
                            "debit",
                            LedgerError::ReentrantCall(self.debit_lock.operation()),
                        ))
                    }
                }
            } else {
                None
            };

            let Some(registry) = self.bound_registry() else {
                return Err(self.reject("debit", LedgerError::NotInitialized));
            };

            if recipient.is_zero() {
                return Err(self.reject(
                    "debit",
                    LedgerError::InvalidParameters(ParameterFault::NullRecipient),
                ));
            }
            if amount.is_zero() {
                return Err(self.reject(
                    "debit",
                    LedgerError::InvalidParameters(ParameterFault::ZeroAmount),
                ));
            }

            let available = self.state.lock().total_balance;
            if amount > available {
                return Err(self.reject(
                    "debit",
                    LedgerError::InsufficientFunds {
                        requested: amount,
                        available,
                    },
                ));
            }

            let claim = AuthorizationClaim::new(self.identity, recipient, amount, nonce);
            debug!(ledger = %self.identity, %recipient, %amount, %commitment, "requesting authorization");
            registry
                .consume(&claim, commitment)
                .map_err(|cause| self.reject("debit", LedgerError::AuthorizationRejected(cause)))?;

            let available = self.state.lock().total_balance;
            let Some(new_balance) = available.checked_sub(amount) else {
                return Err(self.reject(
                    "debit",
                    LedgerError::InsufficientFunds {
                        requested: amount,
                        available,
                    },
                ));
            };
            self.set_balance(new_balance);

            self.events.emit(
                &self.substrate,
                LedgerEvent::Debited {
                    recipient,
                    amount,
                    commitment,
                    new_balance,
                },
            );
            info!(ledger = %self.identity, %recipient, %amount, %commitment, %new_balance, "debited");

            self.transfers.transfer(recipient, amount).map_err(|reason| {
                self.reject(
                    "debit",
                    LedgerError::TransferFailed {
                        recipient,
                        amount,
                        reason,
                    },
                )
            })?;

            Ok(new_balance)
        })
    }

    fn balance(&self) -> U256 {
        self.substrate.observe(|| self.state.lock().total_balance)
    }

    fn is_initialized(&self) -> bool {
        self.substrate.observe(|| self.state.lock().is_initialized())
    }

    fn owner(&self) -> Option<Address> {
        self.substrate.observe(|| self.state.lock().owner)
    }

    fn registry_identity(&self) -> Option<Address> {
        self.substrate
            .observe(|| self.state.lock().registry_identity())
    }
}

impl fmt::Debug for CustodyLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustodyLedger")
            .field("identity", &self.identity)
            .field("config", &self.config)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}
