//! # Request Handler
//!
//! Maps serialized requests onto a deployment and reports every outcome with
//! its rejection kind.
//!
//! ## Wire Format
//!
//! One JSON object per request, tagged by `op`:
//!
//! ```json
//! {"correlation_id":"…","request":{"op":"credit","source":"0x…","amount":"0xa"}}
//! ```
//!
//! `U256` values travel as `0x`-prefixed hex strings, identities as 20-byte
//! hex and commitments as 32-byte hex. A missing `correlation_id` is replaced
//! by a fresh one.

use crate::bootstrap::{Deployment, DeploymentStatus};
use crate::issuer::{CommitmentIssuer, IssuedAuthorization, NonceStrategy};
use cc_01_authorization_registry::{AuthorizationRegistryApi, RegistryEvent};
use cc_02_custody_ledger::{CustodyLedgerApi, DebitRequest, LedgerError, LedgerEvent};
use serde::{Deserialize, Serialize};
use shared_types::{Address, AuditRecord, Commitment, RejectionKind, U256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// =============================================================================
// ENVELOPES
// =============================================================================

/// A request with its correlation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Echoed back in the response.
    #[serde(default = "Uuid::new_v4")]
    pub correlation_id: Uuid,
    /// The operation.
    pub request: Request,
}

impl RequestEnvelope {
    /// Wraps `request` with a fresh correlation id.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            request,
        }
    }
}

/// Operations served by the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Deposit into the Ledger.
    Credit {
        /// Depositor.
        source: Address,
        /// Amount.
        amount: U256,
    },
    /// Release funds against a commitment.
    Debit {
        /// Recipient.
        recipient: Address,
        /// Amount.
        amount: U256,
        /// Issued commitment.
        commitment: Commitment,
        /// Nonce the commitment was issued with.
        nonce: U256,
    },
    /// Issue an authorization for the deployment's Ledger.
    Issue {
        /// Recipient.
        recipient: Address,
        /// Amount.
        amount: U256,
        /// Explicit nonce; the issuer picks one when absent.
        #[serde(default)]
        nonce: Option<U256>,
    },
    /// Pooled balance.
    Balance,
    /// Consumption state of a commitment.
    IsConsumed {
        /// Commitment to look up.
        commitment: Commitment,
    },
    /// Deployment snapshot.
    Status,
    /// Audit records of both components.
    AuditTrail,
}

/// Successful results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Pooled balance after the operation.
    Balance {
        /// Balance.
        balance: U256,
    },
    /// A freshly issued authorization.
    Issued(IssuedAuthorization),
    /// Consumption state.
    Consumed {
        /// The commitment.
        commitment: Commitment,
        /// Whether it was consumed.
        consumed: bool,
    },
    /// Deployment snapshot.
    Status(DeploymentStatus),
    /// Audit records.
    AuditTrail {
        /// Registry records.
        registry: Vec<AuditRecord<RegistryEvent>>,
        /// Ledger records.
        ledger: Vec<AuditRecord<LedgerEvent>>,
    },
}

/// Result of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The request succeeded.
    Accepted {
        /// The result.
        result: Response,
    },
    /// The request was rejected and had no effect.
    Rejected {
        /// Rejection kind.
        kind: RejectionKind,
        /// Human-readable cause.
        message: String,
    },
}

impl Outcome {
    /// Returns true for `Accepted`.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

impl From<LedgerError> for Outcome {
    fn from(err: LedgerError) -> Self {
        Self::Rejected {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// A response with the correlation id of its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Correlation id of the request.
    pub correlation_id: Uuid,
    /// What happened.
    pub outcome: Outcome,
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Request counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerStats {
    /// Requests seen, including malformed ones.
    pub processed: u64,
    /// Requests accepted.
    pub accepted: u64,
    /// Requests rejected.
    pub rejected: u64,
}

#[derive(Debug, Default)]
struct Counters {
    processed: AtomicU64,
    accepted: AtomicU64,
    rejected: AtomicU64,
}

impl Counters {
    fn record(&self, outcome: &Outcome) {
        self.processed.fetch_add(1, Ordering::Relaxed);
        if outcome.is_accepted() {
            self.accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> HandlerStats {
        HandlerStats {
            processed: self.processed.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

// =============================================================================
// HANDLER
// =============================================================================

/// Serves requests against one deployment.
#[derive(Debug)]
pub struct RequestHandler {
    deployment: Arc<Deployment>,
    issuer: CommitmentIssuer,
    counters: Counters,
}

impl RequestHandler {
    /// Creates a handler whose issuer shares the deployment's network id.
    #[must_use]
    pub fn new(deployment: Arc<Deployment>, strategy: NonceStrategy) -> Self {
        let issuer = CommitmentIssuer::new(deployment.substrate().network_id(), strategy);
        Self {
            deployment,
            issuer,
            counters: Counters::default(),
        }
    }

    /// The served deployment.
    #[must_use]
    pub fn deployment(&self) -> &Arc<Deployment> {
        &self.deployment
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> HandlerStats {
        self.counters.snapshot()
    }

    /// Handles one request.
    #[instrument(skip(self, envelope), fields(correlation_id = %envelope.correlation_id))]
    pub fn handle(&self, envelope: RequestEnvelope) -> ResponseEnvelope {
        let outcome = match self.dispatch(envelope.request) {
            Ok(result) => Outcome::Accepted { result },
            Err(err) => Outcome::from(err),
        };
        self.counters.record(&outcome);
        match &outcome {
            Outcome::Accepted { .. } => info!("request accepted"),
            Outcome::Rejected { kind, message } => warn!(%kind, %message, "request rejected"),
        }
        ResponseEnvelope {
            correlation_id: envelope.correlation_id,
            outcome,
        }
    }

    /// Handles one JSON-encoded request and returns the JSON-encoded response.
    pub fn handle_line(&self, line: &str) -> Result<String, serde_json::Error> {
        let response = match serde_json::from_str::<RequestEnvelope>(line) {
            Ok(envelope) => self.handle(envelope),
            Err(err) => {
                warn!(error = %err, "malformed request");
                let outcome = Outcome::Rejected {
                    kind: RejectionKind::InvalidParameters,
                    message: format!("malformed request: {err}"),
                };
                self.counters.record(&outcome);
                ResponseEnvelope {
                    correlation_id: Uuid::nil(),
                    outcome,
                }
            }
        };
        serde_json::to_string(&response)
    }

    fn dispatch(&self, request: Request) -> Result<Response, LedgerError> {
        let ledger = self.deployment.ledger();
        let registry = self.deployment.registry();
        match request {
            Request::Credit { source, amount } => {
                let balance = ledger.credit(source, amount)?;
                Ok(Response::Balance { balance })
            }
            Request::Debit {
                recipient,
                amount,
                commitment,
                nonce,
            } => {
                let balance =
                    ledger.debit(&DebitRequest::new(recipient, amount, commitment, nonce))?;
                Ok(Response::Balance { balance })
            }
            Request::Issue {
                recipient,
                amount,
                nonce,
            } => {
                let issued = match nonce {
                    Some(nonce) => {
                        self.issuer
                            .issue_with_nonce(ledger.identity(), recipient, amount, nonce)
                    }
                    None => self.issuer.issue(ledger.identity(), recipient, amount),
                };
                Ok(Response::Issued(issued))
            }
            Request::Balance => Ok(Response::Balance {
                balance: ledger.balance(),
            }),
            Request::IsConsumed { commitment } => Ok(Response::Consumed {
                commitment,
                consumed: registry.is_consumed(&commitment),
            }),
            Request::Status => Ok(Response::Status(self.deployment.status())),
            Request::AuditTrail => Ok(Response::AuditTrail {
                registry: registry.audit_trail(),
                ledger: ledger.audit_trail(),
            }),
        }
    }
}
