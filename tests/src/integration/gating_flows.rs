//! # Gating Flow Integration Tests
//!
//! Exercises the full session wiring: the Persistent Entitlement Store
//! (pg-01), Access Code Authority (pg-02), Payment Verification Gateway
//! (pg-03) and both coordinators (pg-04, pg-05) sharing one notification
//! bus, the way a live session assembles them.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pg_01_entitlement_store::{EntitlementStore, InMemoryKVStore, SystemTimeSource};
    use pg_02_access_authority::AccessCodeAuthority;
    use pg_03_payment_gateway::{
        PaymentAuthority, PaymentGateway, PaymentOutcome, StaticPaymentAuthority,
        SubscriptionOutcome, UnreachablePaymentAuthority,
    };
    use pg_04_access_coordinator::AccessCoordinator;
    use pg_05_payment_coordinator::PaymentCoordinator;
    use shared_bus::{EventFilter, GateEvent, GrantSource, InMemoryNotificationBus};
    use shared_types::{PlanKind, SubscriptionRecord, SubscriptionStatus};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// A fully wired logical session over an in-memory store.
    struct Session<A: PaymentAuthority> {
        store: Arc<EntitlementStore<InMemoryKVStore>>,
        bus: Arc<InMemoryNotificationBus>,
        access: AccessCoordinator<InMemoryKVStore, InMemoryNotificationBus>,
        payments:
            PaymentCoordinator<InMemoryKVStore, A, SystemTimeSource, InMemoryNotificationBus>,
    }

    fn session<A: PaymentAuthority>(authority: A) -> Session<A> {
        let store = Arc::new(EntitlementStore::new(InMemoryKVStore::new()));
        let bus = Arc::new(InMemoryNotificationBus::new());
        let code_authority = Arc::new(AccessCodeAuthority::new(store.clone()));
        let gateway = Arc::new(PaymentGateway::new(
            store.clone(),
            code_authority.clone(),
            authority,
            SystemTimeSource,
        ));

        Session {
            access: AccessCoordinator::new(code_authority, bus.clone()),
            payments: PaymentCoordinator::new(store.clone(), gateway, bus.clone()),
            store,
            bus,
        }
    }

    fn confirmed_payment(id: &str) -> StaticPaymentAuthority {
        StaticPaymentAuthority::with_payment(PaymentOutcome {
            payment_id: id.to_string(),
            email: Some("user@example.com".into()),
            plan: PlanKind::OneTime,
        })
    }

    // =============================================================================
    // CODE REDEMPTION FLOW
    // =============================================================================

    #[tokio::test]
    async fn test_empty_store_then_redemption() {
        let session = session(StaticPaymentAuthority::declining());

        // Session start: empty store resolves to denied.
        assert!(!session.access.check_access_status().await);
        assert!(!session.access.has_access());

        // Lowercase submission is canonicalized on storage.
        assert!(session.access.validate_code("ac-deadbeef-123456789").await);
        assert!(session.access.has_access());
        assert_eq!(
            session.store.access_code().unwrap().unwrap().as_str(),
            "AC-DEADBEEF-123456789"
        );
    }

    #[tokio::test]
    async fn test_redemption_survives_recheck() {
        let session = session(StaticPaymentAuthority::declining());
        session.access.validate_code("AC-DEADBEEF-123456789").await;

        // Re-running the entitlement check recomputes from the store and
        // arrives at the same answer.
        assert!(session.access.check_access_status().await);
    }

    #[tokio::test]
    async fn test_redemption_emits_granted_toast() {
        let session = session(StaticPaymentAuthority::declining());
        let mut sub = session.bus.subscribe(EventFilter::all());

        session.access.validate_code("AC-DEADBEEF-123456789").await;

        let event = sub.try_recv().unwrap().unwrap();
        assert!(matches!(
            event,
            GateEvent::AccessGranted {
                source: GrantSource::CodeRedemption,
                ..
            }
        ));
    }

    // =============================================================================
    // PAYMENT FLOW (checkout return -> verification -> entitlement)
    // =============================================================================

    #[tokio::test]
    async fn test_checkout_return_grants_access() {
        let session = session(confirmed_payment("pay_123"));

        assert!(session.payments.verify_payment_status(true, false).await);
        assert!(session.payments.state().has_paid());

        // The gateway minted a code; the access coordinator sees it on its
        // next recomputation without any direct coupling to payments.
        assert!(session.access.check_access_status().await);
        assert!(session.access.has_access());
    }

    #[tokio::test]
    async fn test_double_click_verification_converges() {
        let session = session(confirmed_payment("pay_123"));

        // Two concurrent verifications (double-click on "I have paid").
        // Neither is serialized against the other; deterministic synthesis
        // makes them converge on one code.
        let (a, b) = tokio::join!(
            session.payments.verify_payment_status(true, false),
            session.payments.verify_payment_status(true, false),
        );
        assert!(a && b);

        session.access.check_access_status().await;
        let code = session.access.current_code().unwrap();
        assert_eq!(session.store.access_code().unwrap(), Some(code));
    }

    #[tokio::test]
    async fn test_failed_verification_grants_nothing() {
        let session = session(UnreachablePaymentAuthority);
        session.payments.load_payment_status();

        assert!(!session.payments.verify_payment_status(true, false).await);
        assert!(!session.payments.state().has_paid());
        assert!(session.payments.state().payment_details().is_none());

        assert!(!session.access.check_access_status().await);
    }

    #[tokio::test]
    async fn test_failed_checkout_return_is_reported() {
        let session = session(StaticPaymentAuthority::declining());
        let mut sub = session.bus.subscribe(EventFilter::all());

        session.payments.verify_payment_status(true, false).await;

        let event = sub.try_recv().unwrap().unwrap();
        assert!(matches!(event, GateEvent::VerificationFailed { .. }));
    }

    // =============================================================================
    // SUBSCRIPTION FLOW
    // =============================================================================

    #[tokio::test]
    async fn test_subscription_checkout_sets_pro() {
        let session = session(StaticPaymentAuthority::with_subscription(
            SubscriptionOutcome {
                subscription_id: "sub_42".into(),
                status: SubscriptionStatus::Active,
                renewal_timestamp: 1_700_100_000,
                email: None,
            },
        ));

        assert!(session.payments.verify_payment_status(true, true).await);

        let state = session.payments.state();
        assert!(state.is_pro());
        assert!(!state.has_paid());
        assert_eq!(
            state.subscription_details().unwrap().subscription_id,
            "sub_42"
        );
    }

    #[tokio::test]
    async fn test_stored_subscription_without_payment_record() {
        let session = session(StaticPaymentAuthority::declining());
        session
            .store
            .set_subscription_record(&SubscriptionRecord {
                subscription_id: "sub_42".into(),
                status: SubscriptionStatus::Active,
                renewal_timestamp: 1_700_100_000,
            })
            .unwrap();

        let state = session.payments.load_payment_status();
        assert!(state.is_pro());
        assert!(!state.has_paid());
    }

    // =============================================================================
    // REVOCATION
    // =============================================================================

    #[tokio::test]
    async fn test_revocation_keeps_payment_history() {
        let session = session(confirmed_payment("pay_123"));
        session.payments.verify_payment_status(true, false).await;
        session.access.check_access_status().await;
        assert!(session.access.has_access());

        session.access.revoke_access().await;

        assert!(!session.access.has_access());
        assert!(session.store.access_code().unwrap().is_none());
        // Logout does not delete payment history.
        assert!(session.store.payment_record().unwrap().is_some());
        assert!(session.payments.load_payment_status().has_paid());
    }

    #[tokio::test]
    async fn test_grant_revoke_redeem_restores_access() {
        let session = session(StaticPaymentAuthority::declining());

        let code = session.access.grant_access("pay_999", None).await.unwrap();
        session.access.revoke_access().await;
        assert!(!session.access.has_access());

        // The minted code stays valid after revocation; only the session
        // pointer was cleared.
        assert!(session.access.validate_code(code.as_str()).await);
        assert!(session.access.has_access());
    }

    #[tokio::test]
    async fn test_reset_payment_is_orthogonal_to_access() {
        let session = session(confirmed_payment("pay_123"));
        session.payments.verify_payment_status(true, false).await;
        session.access.check_access_status().await;

        session.payments.reset_payment().await;

        // Payment history is gone, but the session's code still grants.
        assert!(!session.payments.state().has_paid());
        assert!(session.access.check_access_status().await);
    }

    // =============================================================================
    // SELF-HEALING (non-transactional store)
    // =============================================================================

    #[tokio::test]
    async fn test_payment_record_without_code_self_heals() {
        // Simulate a crash between the record write and code synthesis:
        // a payment record exists but no access code does.
        let session = session(confirmed_payment("pay_123"));
        session
            .store
            .set_payment_record(&shared_types::PaymentRecord {
                payment_id: "pay_123".into(),
                email: Some("user@example.com".into()),
                timestamp: 1_700_000_000,
                plan: PlanKind::OneTime,
            })
            .unwrap();

        assert!(!session.access.check_access_status().await);

        // The next initiated verification completes the synthesis step.
        assert!(session.payments.verify_payment_status(true, false).await);
        assert!(session.access.check_access_status().await);
    }
}
