//! # Replay Attempts
//!
//! Presenting a genuine commitment somewhere it was not issued for.
//!
//! | Attack | Result |
//! |--------|--------|
//! | Same commitment, second ledger on the same Registry | `ParameterMismatch` (or `AlreadyConsumed` once spent) |
//! | Commitment issued for another network | `ParameterMismatch` |
//! | Recipient swap on an intercepted authorization | `ParameterMismatch` |

#[cfg(test)]
mod tests {
    use crate::fixtures::{u, user, TestDeployment};
    use cc_01_authorization_registry::AuthorizationRegistryApi;
    use cc_02_custody_ledger::{CustodyLedgerApi, LedgerConfig};
    use custody_runtime::{CommitmentIssuer, NonceStrategy};
    use shared_types::{Address, NetworkId, RejectionKind};

    #[test]
    fn test_cross_ledger_replay_refused() {
        let t = TestDeployment::new();
        let other = t
            .deployment
            .attach_ledger(Address::from_low_u64(0x0C02), LedgerConfig::default())
            .unwrap();
        t.fund(10);
        other.credit(user(9), u(10)).unwrap();

        // Issued for the first ledger, presented to the second.
        let request = t.authorize(user(1), 4, 1);
        let err = other.debit(&request).unwrap_err();
        assert_eq!(err.authorization_cause(), Some(RejectionKind::ParameterMismatch));
        assert_eq!(other.balance(), u(10));
        assert!(!t.registry().is_consumed(&request.commitment));

        // Spent on the first ledger, then replayed on the second.
        assert_eq!(t.ledger().debit(&request), Ok(u(6)));
        let err = other.debit(&request).unwrap_err();
        assert_eq!(err.authorization_cause(), Some(RejectionKind::AlreadyConsumed));
        assert_eq!(other.balance(), u(10));
    }

    #[test]
    fn test_cross_network_replay_refused() {
        let t = TestDeployment::new();
        t.fund(10);

        let foreign_issuer = CommitmentIssuer::new(NetworkId(2), NonceStrategy::Sequential);
        let foreign = foreign_issuer
            .issue_with_nonce(t.ledger().identity(), user(1), u(4), u(1))
            .debit_request();
        let local = t.authorize(user(1), 4, 1);
        assert_ne!(foreign.commitment, local.commitment);

        let err = t.ledger().debit(&foreign).unwrap_err();
        assert_eq!(err.authorization_cause(), Some(RejectionKind::ParameterMismatch));
        assert_eq!(t.ledger().balance(), u(10));
        assert_eq!(t.ledger().debit(&local), Ok(u(6)));
    }

    #[test]
    fn test_identical_deployments_on_different_networks_are_isolated() {
        let home = TestDeployment::on_network(1);
        let away = TestDeployment::on_network(2);
        home.fund(10);
        away.fund(10);

        let request = home.authorize(user(1), 4, 1);
        assert_eq!(home.ledger().debit(&request), Ok(u(6)));

        let err = away.ledger().debit(&request).unwrap_err();
        assert_eq!(err.authorization_cause(), Some(RejectionKind::ParameterMismatch));
        assert_eq!(away.ledger().balance(), u(10));
        assert!(!away.registry().is_consumed(&request.commitment));
    }

    #[test]
    fn test_intercepted_authorization_cannot_be_redirected() {
        let t = TestDeployment::new();
        t.fund(10);
        let intercepted = t.authorize(user(1), 4, 1);

        let mut redirected = intercepted;
        redirected.recipient = user(0xBAD);
        let err = t.ledger().debit(&redirected).unwrap_err();
        assert_eq!(err.authorization_cause(), Some(RejectionKind::ParameterMismatch));
        assert_eq!(t.transfers().received(user(0xBAD)), u(0));

        assert_eq!(t.ledger().debit(&intercepted), Ok(u(6)));
        assert_eq!(t.transfers().received(user(1)), u(4));
    }

    #[test]
    fn test_fixtures_do_not_share_consumed_sets() {
        let first = TestDeployment::new();
        let second = TestDeployment::new();
        first.fund(10);
        second.fund(10);

        let request = first.authorize(user(1), 4, 1);
        first.ledger().debit(&request).unwrap();
        assert!(first.registry().is_consumed(&request.commitment));
        assert!(!second.registry().is_consumed(&request.commitment));
    }
}
