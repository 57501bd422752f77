//! # Persistence Integration Tests
//!
//! Entitlement must survive a session restart: a new process reading the
//! same file-backed store computes the same `has_access` answer.

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use pg_01_entitlement_store::{EntitlementStore, FileBackedKVStore};
    use pg_02_access_authority::AccessCodeAuthority;
    use pg_04_access_coordinator::AccessCoordinator;
    use shared_bus::InMemoryNotificationBus;
    use shared_types::{SubscriptionRecord, SubscriptionStatus};

    fn open_session(
        path: &Path,
    ) -> (
        Arc<EntitlementStore<FileBackedKVStore>>,
        AccessCoordinator<FileBackedKVStore, InMemoryNotificationBus>,
    ) {
        let store = Arc::new(EntitlementStore::new(FileBackedKVStore::new(path)));
        let authority = Arc::new(AccessCodeAuthority::new(store.clone()));
        let coordinator =
            AccessCoordinator::new(authority, Arc::new(InMemoryNotificationBus::new()));
        (store, coordinator)
    }

    #[tokio::test]
    async fn test_redeemed_code_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entitlements.json");

        {
            let (_store, coordinator) = open_session(&path);
            assert!(coordinator.validate_code("ac-deadbeef-123456789").await);
        }

        // "Reload": a fresh session over the same file.
        let (_store, coordinator) = open_session(&path);
        assert!(coordinator.check_access_status().await);
        assert_eq!(
            coordinator.current_code().unwrap().as_str(),
            "AC-DEADBEEF-123456789"
        );
    }

    #[tokio::test]
    async fn test_revocation_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entitlements.json");

        {
            let (_store, coordinator) = open_session(&path);
            coordinator.grant_access("pay_123", None).await.unwrap();
            coordinator.revoke_access().await;
        }

        let (_store, coordinator) = open_session(&path);
        assert!(!coordinator.check_access_status().await);
    }

    #[tokio::test]
    async fn test_synthesis_is_stable_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entitlements.json");

        let first = {
            let (_store, coordinator) = open_session(&path);
            coordinator.grant_access("pay_123", None).await.unwrap()
        };

        // A replayed grant in a later session mints the identical code.
        let (_store, coordinator) = open_session(&path);
        let second = coordinator.grant_access("pay_123", None).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_subscription_record_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entitlements.json");

        {
            let (store, _coordinator) = open_session(&path);
            store
                .set_subscription_record(&SubscriptionRecord {
                    subscription_id: "sub_42".into(),
                    status: SubscriptionStatus::Active,
                    renewal_timestamp: 1_700_100_000,
                })
                .unwrap();
        }

        let (store, _coordinator) = open_session(&path);
        let record = store.subscription_record().unwrap().unwrap();
        assert_eq!(record.subscription_id, "sub_42");
        assert!(record.status.is_entitled());
    }
}
