//! # Re-entrant Drain Attempts
//!
//! A malicious recipient runs code when funds arrive and calls back into the
//! Ledger (or the Registry) before the original `debit` returns.
//!
//! | Attack | Defense that stops it |
//! |--------|-----------------------|
//! | Nested debit, second commitment | debit guard (`ReentrantCall`) |
//! | Nested debit, guard off, low balance | balance reduced before transfer (`InsufficientFunds`) |
//! | Nested debit, guard off, same commitment | consumed before transfer (`AlreadyConsumed`) |
//! | Nested verify of the same claim | consumed before transfer (`AlreadyConsumed`) |
//! | Nested effects, then abort | whole-operation rollback |
//! | Parallel redemption from many threads | serialized execution, single consumption |

#[cfg(test)]
mod tests {
    use crate::fixtures::{u, user, TestDeployment};
    use cc_01_authorization_registry::{AuthorizationRegistryApi, RegistryError};
    use cc_02_custody_ledger::{
        recipient_hook, CustodyLedgerApi, DebitRequest, LedgerConfig, LedgerError, TransferError,
    };
    use parking_lot::Mutex;
    use shared_types::{Address, AuthorizationClaim, RejectionKind, U256};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    /// Installs a hook on `attacker` that re-enters `debit` once with `nested`
    /// and records the nested outcome.
    fn arm_reentrant_debit(
        t: &TestDeployment,
        attacker: Address,
        nested: DebitRequest,
    ) -> Arc<Mutex<Vec<Result<U256, LedgerError>>>> {
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&outcomes);
        let armed = AtomicBool::new(true);
        let ledger = Arc::downgrade(t.ledger());
        t.transfers().set_hook(
            attacker,
            recipient_hook(move |_, _| {
                let Some(ledger) = ledger.upgrade() else {
                    return Ok(());
                };
                if armed.swap(false, Ordering::SeqCst) {
                    let outcome = ledger.debit(&nested);
                    sink.lock().push(outcome);
                }
                Ok(())
            }),
        );
        outcomes
    }

    #[test]
    fn test_guard_refuses_nested_debit() {
        let t = TestDeployment::new();
        t.fund(10);
        let attacker = user(0xBAD);
        let first = t.authorize(attacker, 4, 1);
        let second = t.authorize(attacker, 4, 2);
        let outcomes = arm_reentrant_debit(&t, attacker, second);

        assert_eq!(t.ledger().debit(&first), Ok(u(6)));
        assert_eq!(
            outcomes.lock().clone(),
            vec![Err(LedgerError::ReentrantCall("debit"))]
        );
        assert_eq!(t.transfers().received(attacker), u(4));
        assert!(!t.registry().is_consumed(&second.commitment));

        // The second authorization is still good outside the callback.
        t.transfers().clear_hook(attacker);
        assert_eq!(t.ledger().debit(&second), Ok(u(2)));
    }

    #[test]
    fn test_nested_debit_sees_reduced_balance() {
        let t = TestDeployment::with_ledger_config(LedgerConfig::without_reentrancy_guard());
        t.fund(6);
        let attacker = user(0xBAD);
        let first = t.authorize(attacker, 4, 1);
        let second = t.authorize(attacker, 4, 2);
        let outcomes = arm_reentrant_debit(&t, attacker, second);

        assert_eq!(t.ledger().debit(&first), Ok(u(2)));
        assert_eq!(
            outcomes.lock().clone(),
            vec![Err(LedgerError::InsufficientFunds {
                requested: u(4),
                available: u(2),
            })]
        );
        assert_eq!(t.ledger().balance(), u(2));
        assert_eq!(t.transfers().received(attacker), u(4));
    }

    #[test]
    fn test_nested_replay_sees_consumed_commitment() {
        let t = TestDeployment::with_ledger_config(LedgerConfig::without_reentrancy_guard());
        t.fund(10);
        let attacker = user(0xBAD);
        let first = t.authorize(attacker, 4, 1);
        let outcomes = arm_reentrant_debit(&t, attacker, first);

        assert_eq!(t.ledger().debit(&first), Ok(u(6)));
        assert_eq!(
            outcomes.lock().clone(),
            vec![Err(LedgerError::AuthorizationRejected(
                RegistryError::AlreadyConsumed(first.commitment)
            ))]
        );
        assert_eq!(t.ledger().balance(), u(6));
        assert_eq!(t.transfers().received(attacker), u(4));
    }

    #[test]
    fn test_unguarded_nested_debit_with_valid_authorization_conserves_funds() {
        let t = TestDeployment::with_ledger_config(LedgerConfig::without_reentrancy_guard());
        t.fund(10);
        let attacker = user(0xBAD);
        let first = t.authorize(attacker, 4, 1);
        let second = t.authorize(attacker, 4, 2);
        let outcomes = arm_reentrant_debit(&t, attacker, second);

        assert_eq!(t.ledger().debit(&first), Ok(u(6)));
        assert_eq!(outcomes.lock().clone(), vec![Ok(u(2))]);
        assert_eq!(t.ledger().balance(), u(2));
        assert_eq!(t.transfers().received(attacker), u(8));
    }

    #[test]
    fn test_nested_verify_of_same_claim_refused() {
        let t = TestDeployment::new();
        t.fund(10);
        let attacker = user(0xBAD);
        let request = t.authorize(attacker, 4, 1);
        let claim = AuthorizationClaim::new(t.ledger().identity(), attacker, u(4), u(1));

        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&outcomes);
        let registry = Arc::downgrade(t.registry());
        let commitment = request.commitment;
        t.transfers().set_hook(
            attacker,
            recipient_hook(move |_, _| {
                if let Some(registry) = registry.upgrade() {
                    sink.lock().push(registry.verify(&claim, commitment));
                }
                Ok(())
            }),
        );

        assert_eq!(t.ledger().debit(&request), Ok(u(6)));
        assert_eq!(
            outcomes.lock().clone(),
            vec![Err(RegistryError::AlreadyConsumed(commitment))]
        );
    }

    #[test]
    fn test_aborting_recipient_undoes_nested_effects() {
        let t = TestDeployment::with_ledger_config(LedgerConfig::without_reentrancy_guard());
        t.fund(10);
        let attacker = user(0xBAD);
        let first = t.authorize(attacker, 4, 1);
        let second = t.authorize(attacker, 4, 2);
        let before = t.observe();

        let ledger = Arc::downgrade(t.ledger());
        t.transfers().set_hook(
            attacker,
            recipient_hook(move |_, _| {
                let Some(ledger) = ledger.upgrade() else {
                    return Ok(());
                };
                // The nested debit succeeds, then the recipient aborts the outer one.
                if ledger.balance() == u(6) {
                    ledger
                        .debit(&second)
                        .map_err(|e| TransferError::Hook(e.to_string()))?;
                    return Err(TransferError::Hook("abort after nested debit".into()));
                }
                Ok(())
            }),
        );

        let err = t.ledger().debit(&first).unwrap_err();
        assert_eq!(err.kind(), RejectionKind::TransferFailed);
        assert_eq!(t.observe(), before);
        assert!(!t.registry().is_consumed(&first.commitment));
        assert!(!t.registry().is_consumed(&second.commitment));
    }

    #[test]
    fn test_parallel_redemption_single_winner() {
        let t = Arc::new(TestDeployment::new());
        t.fund(100);
        let request = t.authorize(user(1), 10, 1);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let t = Arc::clone(&t);
                thread::spawn(move || t.ledger().debit(&request))
            })
            .collect();
        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("debit thread panicked"))
            .collect();

        let winners = outcomes.iter().filter(|o| o.is_ok()).count();
        assert_eq!(winners, 1);
        for outcome in outcomes.iter().filter(|o| o.is_err()) {
            assert_eq!(
                outcome.clone().unwrap_err().authorization_cause(),
                Some(RejectionKind::AlreadyConsumed)
            );
        }
        assert_eq!(t.ledger().balance(), u(90));
        assert_eq!(t.transfers().received(user(1)), u(10));
    }
}
