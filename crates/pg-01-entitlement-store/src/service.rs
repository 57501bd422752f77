//! # Entitlement Store Service
//!
//! Typed access to the three entitlement records over a raw `KeyValueStore`.
//!
//! A value that fails to deserialize is logged and reported as absent, so a
//! corrupt record degrades to "no entitlement" instead of an error the
//! coordinators would have to special-case. Lock and I/O failures still
//! surface as `StoreError`.

use crate::errors::StoreError;
use crate::ports::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{AccessCode, PaymentRecord, SubscriptionRecord};
use tracing::warn;

/// Conceptual store keys. Each record is independently addressable.
pub mod keys {
    pub const ACCESS_CODE: &str = "access_code";
    pub const PAYMENT_RECORD: &str = "payment_record";
    pub const SUBSCRIPTION_RECORD: &str = "subscription_record";
}

/// The Persistent Entitlement Store.
///
/// Single source of truth for entitlement state. All session-scoped state
/// downstream is a cache invalidated by re-reading this store.
pub struct EntitlementStore<KV>
where
    KV: KeyValueStore,
{
    kv: KV,
}

impl<KV> EntitlementStore<KV>
where
    KV: KeyValueStore,
{
    /// Create a store over the given key-value adapter.
    pub fn new(kv: KV) -> Self {
        Self { kv }
    }

    fn read_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // Corrupt record reads as absent; next successful write heals it.
                warn!(key, error = %e, "Corrupt record in entitlement store");
                Ok(None)
            }
        }
    }

    fn write_record<T: Serialize>(&self, key: &str, record: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(record).map_err(|e| StoreError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.kv.put(key, &raw)
    }

    // =========================================================================
    // ACCESS CODE
    // =========================================================================

    /// The stored access code, verbatim.
    pub fn access_code(&self) -> Result<Option<AccessCode>, StoreError> {
        self.read_record(keys::ACCESS_CODE)
    }

    /// Persist `code` as the current access code.
    pub fn set_access_code(&self, code: &AccessCode) -> Result<(), StoreError> {
        self.write_record(keys::ACCESS_CODE, code)
    }

    /// Remove the stored access code only. Payment and subscription records
    /// are untouched; revoking access is distinct from deleting payment
    /// history.
    pub fn clear_access_code(&self) -> Result<(), StoreError> {
        self.kv.delete(keys::ACCESS_CODE)
    }

    // =========================================================================
    // PAYMENT RECORD
    // =========================================================================

    /// The stored one-time payment record, if any.
    pub fn payment_record(&self) -> Result<Option<PaymentRecord>, StoreError> {
        self.read_record(keys::PAYMENT_RECORD)
    }

    /// Persist a completed one-time payment.
    pub fn set_payment_record(&self, record: &PaymentRecord) -> Result<(), StoreError> {
        self.write_record(keys::PAYMENT_RECORD, record)
    }

    /// Remove the stored payment record.
    pub fn clear_payment_record(&self) -> Result<(), StoreError> {
        self.kv.delete(keys::PAYMENT_RECORD)
    }

    // =========================================================================
    // SUBSCRIPTION RECORD
    // =========================================================================

    /// The stored subscription record, if any.
    pub fn subscription_record(&self) -> Result<Option<SubscriptionRecord>, StoreError> {
        self.read_record(keys::SUBSCRIPTION_RECORD)
    }

    /// Persist the current subscription.
    pub fn set_subscription_record(&self, record: &SubscriptionRecord) -> Result<(), StoreError> {
        self.write_record(keys::SUBSCRIPTION_RECORD, record)
    }

    /// Remove the stored subscription record.
    pub fn clear_subscription_record(&self) -> Result<(), StoreError> {
        self.kv.delete(keys::SUBSCRIPTION_RECORD)
    }

    // =========================================================================
    // BULK
    // =========================================================================

    /// Remove all three records.
    ///
    /// Within a single process, subsequent reads never observe a partial
    /// clear: the deletes complete before this call returns. There is no
    /// cross-process transaction; a crash mid-clear is repaired by the next
    /// entitlement recomputation.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        self.kv.delete(keys::ACCESS_CODE)?;
        self.kv.delete(keys::PAYMENT_RECORD)?;
        self.kv.delete(keys::SUBSCRIPTION_RECORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryKVStore;
    use shared_types::{PlanKind, SubscriptionStatus};

    fn store() -> EntitlementStore<InMemoryKVStore> {
        EntitlementStore::new(InMemoryKVStore::new())
    }

    fn payment(id: &str) -> PaymentRecord {
        PaymentRecord {
            payment_id: id.to_string(),
            email: None,
            timestamp: 1_700_000_000,
            plan: PlanKind::OneTime,
        }
    }

    #[test]
    fn test_access_code_round_trip() {
        let store = store();
        assert!(store.access_code().unwrap().is_none());

        let code = AccessCode::parse("AC-DEADBEEF-123456789").unwrap();
        store.set_access_code(&code).unwrap();
        assert_eq!(store.access_code().unwrap(), Some(code));

        store.clear_access_code().unwrap();
        assert!(store.access_code().unwrap().is_none());
    }

    #[test]
    fn test_records_are_independent() {
        let store = store();
        let code = AccessCode::parse("AC-DEADBEEF-123456789").unwrap();
        store.set_access_code(&code).unwrap();
        store.set_payment_record(&payment("pay_123")).unwrap();

        // Clearing the code leaves the payment record alone.
        store.clear_access_code().unwrap();
        assert!(store.access_code().unwrap().is_none());
        assert!(store.payment_record().unwrap().is_some());
    }

    #[test]
    fn test_subscription_round_trip() {
        let store = store();
        let sub = SubscriptionRecord {
            subscription_id: "sub_42".into(),
            status: SubscriptionStatus::Active,
            renewal_timestamp: 1_700_100_000,
        };
        store.set_subscription_record(&sub).unwrap();
        assert_eq!(store.subscription_record().unwrap(), Some(sub));
    }

    #[test]
    fn test_clear_all_removes_everything() {
        let store = store();
        let code = AccessCode::parse("AC-DEADBEEF-123456789").unwrap();
        store.set_access_code(&code).unwrap();
        store.set_payment_record(&payment("pay_123")).unwrap();
        store
            .set_subscription_record(&SubscriptionRecord {
                subscription_id: "sub_42".into(),
                status: SubscriptionStatus::Active,
                renewal_timestamp: 0,
            })
            .unwrap();

        store.clear_all().unwrap();

        assert!(store.access_code().unwrap().is_none());
        assert!(store.payment_record().unwrap().is_none());
        assert!(store.subscription_record().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_record_reads_as_absent() {
        let kv = InMemoryKVStore::new();
        kv.put(keys::PAYMENT_RECORD, "{broken").unwrap();
        let store = EntitlementStore::new(kv);

        assert!(store.payment_record().unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_existing_record() {
        let store = store();
        store.set_payment_record(&payment("pay_1")).unwrap();
        store.set_payment_record(&payment("pay_2")).unwrap();

        assert_eq!(
            store.payment_record().unwrap().unwrap().payment_id,
            "pay_2"
        );
    }
}
