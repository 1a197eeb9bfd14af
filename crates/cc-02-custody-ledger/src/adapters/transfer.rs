//! # In-Memory Transfer Adapter
//!
//! Records payouts inside the running operation and optionally hands control
//! to per-recipient code after the funds arrive. Payouts are journaled with
//! the execution substrate, so a rolled-back debit leaves no payout behind.

use crate::domain::TransferError;
use crate::ports::outbound::TransferExecutor;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{Address, ExecutionSubstrate, U256};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Code a recipient runs when funds arrive.
pub type RecipientHook = Arc<dyn Fn(Address, U256) -> Result<(), TransferError> + Send + Sync>;

/// Wraps a closure as a [`RecipientHook`].
pub fn recipient_hook<F>(hook: F) -> RecipientHook
where
    F: Fn(Address, U256) -> Result<(), TransferError> + Send + Sync + 'static,
{
    Arc::new(hook)
}

/// One delivered transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Receiving identity.
    pub recipient: Address,
    /// Delivered amount.
    pub amount: U256,
}

#[derive(Default)]
struct TransferBook {
    payouts: Vec<Payout>,
    hooks: HashMap<Address, RecipientHook>,
    refusing: HashSet<Address>,
}

/// Transfer effect backed by an in-memory payout book.
pub struct InMemoryTransfers {
    substrate: Arc<ExecutionSubstrate>,
    book: Arc<Mutex<TransferBook>>,
}

impl InMemoryTransfers {
    /// Creates an empty payout book in `substrate`.
    #[must_use]
    pub fn new(substrate: Arc<ExecutionSubstrate>) -> Self {
        Self {
            substrate,
            book: Arc::new(Mutex::new(TransferBook::default())),
        }
    }

    /// Runs `hook` every time `recipient` receives funds.
    pub fn set_hook(&self, recipient: Address, hook: RecipientHook) {
        self.book.lock().hooks.insert(recipient, hook);
    }

    /// Removes the hook of `recipient`.
    pub fn clear_hook(&self, recipient: Address) {
        self.book.lock().hooks.remove(&recipient);
    }

    /// Makes every transfer to `recipient` fail.
    pub fn refuse(&self, recipient: Address) {
        self.book.lock().refusing.insert(recipient);
    }

    /// Lets `recipient` accept transfers again.
    pub fn accept(&self, recipient: Address) {
        self.book.lock().refusing.remove(&recipient);
    }

    /// All delivered payouts in delivery order.
    #[must_use]
    pub fn payouts(&self) -> Vec<Payout> {
        self.substrate.observe(|| self.book.lock().payouts.clone())
    }

    /// Total delivered to `recipient`.
    #[must_use]
    pub fn received(&self, recipient: Address) -> U256 {
        self.substrate.observe(|| {
            self.book
                .lock()
                .payouts
                .iter()
                .filter(|p| p.recipient == recipient)
                .fold(U256::zero(), |acc, p| acc.saturating_add(p.amount))
        })
    }

    /// Total delivered to everyone.
    #[must_use]
    pub fn total_paid(&self) -> U256 {
        self.substrate.observe(|| {
            self.book
                .lock()
                .payouts
                .iter()
                .fold(U256::zero(), |acc, p| acc.saturating_add(p.amount))
        })
    }
}

impl TransferExecutor for InMemoryTransfers {
    fn transfer(&self, recipient: Address, amount: U256) -> Result<(), TransferError> {
        let hook = {
            let mut book = self.book.lock();
            if book.refusing.contains(&recipient) {
                warn!(%recipient, %amount, "recipient refused transfer");
                return Err(TransferError::Refused(recipient));
            }
            book.payouts.push(Payout { recipient, amount });
            book.hooks.get(&recipient).cloned()
        };

        let book = Arc::clone(&self.book);
        self.substrate.on_rollback(move || {
            book.lock().payouts.pop();
        });
        debug!(%recipient, %amount, "payout recorded");

        // The book lock is released before recipient code runs.
        match hook {
            Some(hook) => hook(recipient, amount),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for InMemoryTransfers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let book = self.book.lock();
        f.debug_struct("InMemoryTransfers")
            .field("payouts", &book.payouts.len())
            .field("hooks", &book.hooks.len())
            .field("refusing", &book.refusing.len())
            .finish()
    }
}
