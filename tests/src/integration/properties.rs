//! # Property-Based Invariants
//!
//! ## Properties Verified
//!
//! - Single consumption: a commitment releases funds at most once
//! - Parameter binding: changing any claimed field invalidates the commitment
//! - Balance conservation: balance equals deposits minus releases
//! - Rejection is a no-op: a refused call leaves every observable unchanged
//! - Initialize once: only the first `initialize` of a component succeeds

#[cfg(test)]
mod tests {
    use crate::fixtures::{depositor, u, user, TestDeployment};
    use cc_01_authorization_registry::{AuthorizationRegistry, AuthorizationRegistryApi};
    use cc_02_custody_ledger::{CustodyLedger, CustodyLedgerApi, InMemoryTransfers};
    use proptest::prelude::*;
    use shared_types::{Address, ExecutionSubstrate, NetworkId, RejectionKind, U256};
    use std::sync::Arc;

    /// One step of a randomized session.
    #[derive(Debug, Clone)]
    enum Step {
        Credit(u64),
        Debit { recipient: u64, amount: u64, nonce: u64 },
        Replay(usize),
        Tampered { amount: u64, nonce: u64 },
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0u64..50).prop_map(Step::Credit),
            (1u64..5, 1u64..40, 0u64..1_000)
                .prop_map(|(recipient, amount, nonce)| Step::Debit { recipient, amount, nonce }),
            (0usize..8).prop_map(Step::Replay),
            (1u64..40, 0u64..1_000).prop_map(|(amount, nonce)| Step::Tampered { amount, nonce }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: a redeemed commitment never releases funds again,
        /// whatever parameters accompany it.
        #[test]
        fn prop_single_consumption(
            amount in 1u64..1_000,
            nonce in 0u64..u64::MAX,
            other_recipient in 1u64..100,
            other_amount in 1u64..1_000,
        ) {
            let t = TestDeployment::new();
            t.fund(10_000);
            let request = t.authorize(user(1), amount, nonce);
            prop_assert!(t.ledger().debit(&request).is_ok());

            let mut replay = request;
            replay.recipient = user(other_recipient);
            replay.amount = u(other_amount);
            let before = t.observe();

            for attempt in [request, replay] {
                let err = t.ledger().debit(&attempt).unwrap_err();
                prop_assert_eq!(err.authorization_cause(), Some(RejectionKind::AlreadyConsumed));
            }
            prop_assert_eq!(t.observe(), before);
        }

        /// Property: altering recipient, amount, nonce or ledger breaks the commitment.
        #[test]
        fn prop_parameter_binding(
            amount in 1u64..1_000,
            nonce in 0u64..1_000_000,
            field in 0u8..4,
            delta in 1u64..500,
        ) {
            let t = TestDeployment::new();
            t.fund(10_000);
            let honest = t.authorize(user(1), amount, nonce);

            let mut altered = honest;
            match field {
                0 => altered.recipient = user(1 + delta),
                1 => altered.amount = u(amount + delta),
                2 => altered.nonce = u(nonce + delta),
                _ => {
                    let foreign_ledger = Address::from_low_u64(0xF000 + delta);
                    let foreign = t.authorize_for(foreign_ledger, user(1), amount, nonce);
                    altered.commitment = foreign.commitment;
                }
            }

            let err = t.ledger().debit(&altered).unwrap_err();
            prop_assert_eq!(err.authorization_cause(), Some(RejectionKind::ParameterMismatch));
            prop_assert!(!t.registry().is_consumed(&altered.commitment));
            prop_assert!(t.ledger().debit(&honest).is_ok());
        }

        /// Property: balance always equals deposits minus releases, and every
        /// release was paid out exactly once.
        #[test]
        fn prop_balance_conservation(steps in prop::collection::vec(arb_step(), 1..40)) {
            let t = TestDeployment::new();
            let mut deposited = U256::zero();
            let mut released = U256::zero();
            let mut redeemed = Vec::new();

            for step in steps {
                match step {
                    Step::Credit(amount) => {
                        t.ledger().credit(depositor(), u(amount)).unwrap();
                        deposited += u(amount);
                    }
                    Step::Debit { recipient, amount, nonce } => {
                        let request = t.authorize(user(recipient), amount, nonce);
                        if t.ledger().debit(&request).is_ok() {
                            released += u(amount);
                            redeemed.push(request);
                        }
                    }
                    Step::Replay(index) => {
                        if let Some(request) = redeemed.get(index) {
                            prop_assert!(t.ledger().debit(request).is_err());
                        }
                    }
                    Step::Tampered { amount, nonce } => {
                        let mut request = t.authorize(user(1), amount, nonce);
                        request.amount = u(amount + 1);
                        prop_assert!(t.ledger().debit(&request).is_err());
                    }
                }
                prop_assert_eq!(t.ledger().balance(), deposited - released);
                prop_assert_eq!(t.transfers().total_paid(), released);
            }
        }

        /// Property: every rejected call leaves balance, consumed set, audit
        /// trails and payouts exactly as they were.
        #[test]
        fn prop_rejection_is_noop(
            funded in 0u64..100,
            amount in 0u64..200,
            nonce in 0u64..1_000,
            tamper in any::<bool>(),
            refuse in any::<bool>(),
        ) {
            let t = TestDeployment::new();
            t.fund(funded);
            if refuse {
                t.transfers().refuse(user(1));
            }
            let mut request = t.authorize(user(1), amount, nonce);
            if tamper {
                request.nonce = u(nonce + 1);
            }

            let before = t.observe();
            match t.ledger().debit(&request) {
                Ok(balance) => {
                    prop_assert!(!tamper && !refuse && amount > 0 && amount <= funded);
                    prop_assert_eq!(balance, u(funded - amount));
                }
                Err(_) => {
                    prop_assert_eq!(t.observe(), before);
                }
            }
        }

        /// Property: only the first initialize of each component succeeds.
        #[test]
        fn prop_initialize_once(callers in prop::collection::vec(0u64..4, 1..6)) {
            let substrate = Arc::new(ExecutionSubstrate::new(NetworkId(1)));
            let registry = Arc::new(AuthorizationRegistry::new(
                Address::from_low_u64(0xA0),
                Arc::clone(&substrate),
            ));
            let transfers = Arc::new(InMemoryTransfers::new(Arc::clone(&substrate)));
            let ledger = CustodyLedger::new(Address::from_low_u64(0x1E), substrate, transfers);

            // Caller 0 is the null identity.
            let mut registry_owner = None;
            let mut ledger_owner = None;
            for caller in callers {
                let caller = if caller == 0 { Address::ZERO } else { user(caller) };

                let outcome = registry.initialize(caller);
                match registry_owner {
                    Some(owner) => {
                        prop_assert_eq!(outcome.unwrap_err().kind(), RejectionKind::AlreadyInitialized);
                        prop_assert_eq!(registry.owner(), Some(owner));
                    }
                    None if caller.is_zero() => {
                        prop_assert_eq!(outcome.unwrap_err().kind(), RejectionKind::InvalidParameters);
                    }
                    None => {
                        prop_assert!(outcome.is_ok());
                        registry_owner = Some(caller);
                    }
                }

                let outcome = ledger.initialize(caller, registry.clone());
                match ledger_owner {
                    Some(owner) => {
                        prop_assert_eq!(outcome.unwrap_err().kind(), RejectionKind::AlreadyInitialized);
                        prop_assert_eq!(ledger.owner(), Some(owner));
                    }
                    None if caller.is_zero() => {
                        prop_assert_eq!(outcome.unwrap_err().kind(), RejectionKind::InvalidParameters);
                    }
                    None => {
                        prop_assert!(outcome.is_ok());
                        ledger_owner = Some(caller);
                    }
                }
            }
            prop_assert_eq!(registry.audit_trail().len(), usize::from(registry_owner.is_some()));
            prop_assert_eq!(ledger.audit_trail().len(), usize::from(ledger_owner.is_some()));
        }
    }
}
