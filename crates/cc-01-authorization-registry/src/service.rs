//! # Authorization Registry Service
//!
//! Concrete Registry bound to one execution substrate. State lives behind an
//! `Arc<Mutex<_>>` so that undo actions registered with the substrate can
//! restore it after the enclosing operation aborts.

use crate::domain::{RegistryError, RegistryEvent, RegistryState};
use crate::ports::AuthorizationRegistryApi;
use parking_lot::Mutex;
use shared_types::{
    compute_commitment, Address, AuditRecord, AuthorizationClaim, Commitment, EventLog,
    ExecutionSubstrate, ParameterFault, ReentrancyLock,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The Authorization Registry.
pub struct AuthorizationRegistry {
    identity: Address,
    substrate: Arc<ExecutionSubstrate>,
    state: Arc<Mutex<RegistryState>>,
    events: EventLog<RegistryEvent>,
    verify_lock: ReentrancyLock,
}

impl AuthorizationRegistry {
    /// Creates an uninitialized Registry with its own empty consumed set.
    #[must_use]
    pub fn new(identity: Address, substrate: Arc<ExecutionSubstrate>) -> Self {
        Self {
            identity,
            substrate,
            state: Arc::new(Mutex::new(RegistryState::default())),
            events: EventLog::new(identity),
            verify_lock: ReentrancyLock::new("verify"),
        }
    }

    /// Audit records emitted so far.
    #[must_use]
    pub fn audit_trail(&self) -> Vec<AuditRecord<RegistryEvent>> {
        self.substrate.observe(|| self.events.records())
    }

    /// Number of consumed commitments.
    #[must_use]
    pub fn consumed_count(&self) -> usize {
        self.substrate.observe(|| self.state.lock().consumed_count())
    }

    fn reject(&self, err: RegistryError) -> RegistryError {
        warn!(registry = %self.identity, kind = %err.kind(), error = %err, "verify rejected");
        err
    }

    fn mark_consumed(&self, commitment: Commitment) {
        self.state.lock().consumed.insert(commitment);
        let state = Arc::clone(&self.state);
        self.substrate.on_rollback(move || {
            state.lock().consumed.remove(&commitment);
        });
    }
}

impl AuthorizationRegistryApi for AuthorizationRegistry {
    fn identity(&self) -> Address {
        self.identity
    }

    fn substrate(&self) -> &Arc<ExecutionSubstrate> {
        &self.substrate
    }

    fn initialize(&self, caller: Address) -> Result<(), RegistryError> {
        self.substrate.atomic(|| {
            let bound = self.state.lock().owner;
            if let Some(owner) = bound {
                warn!(registry = %self.identity, %owner, "registry already initialized");
                return Err(RegistryError::AlreadyInitialized { owner });
            }
            if caller.is_zero() {
                return Err(RegistryError::InvalidParameters(ParameterFault::NullOwner));
            }

            self.state.lock().owner = Some(caller);
            let state = Arc::clone(&self.state);
            self.substrate.on_rollback(move || {
                state.lock().owner = None;
            });

            self.events
                .emit(&self.substrate, RegistryEvent::Initialized { owner: caller });
            info!(registry = %self.identity, owner = %caller, "registry initialized");
            Ok(())
        })
    }

    fn compute_commitment(&self, claim: &AuthorizationClaim) -> Commitment {
        compute_commitment(claim, self.substrate.network_id())
    }

    fn verify(
        &self,
        claim: &AuthorizationClaim,
        commitment: Commitment,
    ) -> Result<(), RegistryError> {
        self.substrate.atomic(|| {
            let Some(_guard) = self.verify_lock.enter() else {
                return Err(self.reject(RegistryError::ReentrantCall(
                    self.verify_lock.operation(),
                )));
            };

            if !self.state.lock().is_initialized() {
                return Err(self.reject(RegistryError::NotInitialized));
            }

            claim
                .validate()
                .map_err(|fault| self.reject(RegistryError::InvalidParameters(fault)))?;

            if self.state.lock().is_consumed(&commitment) {
                return Err(self.reject(RegistryError::AlreadyConsumed(commitment)));
            }

            let expected = self.compute_commitment(claim);
            debug!(%expected, supplied = %commitment, "recomputed commitment");
            if expected != commitment {
                return Err(self.reject(RegistryError::ParameterMismatch {
                    expected,
                    supplied: commitment,
                }));
            }

            self.mark_consumed(commitment);
            self.events.emit(
                &self.substrate,
                RegistryEvent::Consumed {
                    ledger: claim.ledger,
                    recipient: claim.recipient,
                    amount: claim.amount,
                    commitment,
                },
            );
            info!(
                registry = %self.identity,
                ledger = %claim.ledger,
                recipient = %claim.recipient,
                amount = %claim.amount,
                %commitment,
                "commitment consumed"
            );
            Ok(())
        })
    }

    fn is_consumed(&self, commitment: &Commitment) -> bool {
        self.substrate
            .observe(|| self.state.lock().is_consumed(commitment))
    }

    fn is_initialized(&self) -> bool {
        self.substrate.observe(|| self.state.lock().is_initialized())
    }

    fn owner(&self) -> Option<Address> {
        self.substrate.observe(|| self.state.lock().owner)
    }
}

impl fmt::Debug for AuthorizationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationRegistry")
            .field("identity", &self.identity)
            .field("network_id", &self.substrate.network_id())
            .finish_non_exhaustive()
    }
}
