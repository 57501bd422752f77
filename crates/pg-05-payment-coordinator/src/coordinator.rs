//! # Payment Status Coordinator
//!
//! Loads payment/subscription status from the store, drives verification
//! through the gateway, and exposes the derived `PaymentState`.

use crate::state::PaymentState;
use pg_01_entitlement_store::{EntitlementStore, KeyValueStore, TimeSource};
use pg_03_payment_gateway::{PaymentAuthority, PaymentGateway};
use shared_bus::{GateEvent, NotificationPublisher};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// The Payment Status Coordinator.
///
/// One per logical session, alongside the Access Control Coordinator.
pub struct PaymentCoordinator<KV, A, TS, B>
where
    KV: KeyValueStore,
    A: PaymentAuthority,
    TS: TimeSource,
    B: NotificationPublisher,
{
    store: Arc<EntitlementStore<KV>>,
    gateway: Arc<PaymentGateway<KV, A, TS>>,
    bus: Arc<B>,
    state: RwLock<PaymentState>,
}

impl<KV, A, TS, B> PaymentCoordinator<KV, A, TS, B>
where
    KV: KeyValueStore,
    A: PaymentAuthority,
    TS: TimeSource,
    B: NotificationPublisher,
{
    /// Create a coordinator in the `Loading` state.
    pub fn new(
        store: Arc<EntitlementStore<KV>>,
        gateway: Arc<PaymentGateway<KV, A, TS>>,
        bus: Arc<B>,
    ) -> Self {
        Self {
            store,
            gateway,
            bus,
            state: RwLock::new(PaymentState::Loading),
        }
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn state(&self) -> PaymentState {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn set_state(&self, next: PaymentState) {
        if let Ok(mut state) = self.state.write() {
            *state = next;
        }
    }

    /// Derive status from current store contents.
    ///
    /// `has_paid` mirrors payment-record presence; `is_pro` requires an
    /// active subscription. Details are attached only when the matching
    /// flag is true, so stale detail objects never surface without the
    /// entitlement. Store failures degrade to "nothing on file" with a
    /// logged warning.
    pub fn load_payment_status(&self) -> PaymentState {
        let payment = self.store.payment_record().unwrap_or_else(|e| {
            warn!(error = %e, "Payment record unreadable");
            None
        });
        let subscription = self.store.subscription_record().unwrap_or_else(|e| {
            warn!(error = %e, "Subscription record unreadable");
            None
        });

        let has_paid = payment.is_some();
        let is_pro = subscription
            .as_ref()
            .is_some_and(|record| record.status.is_entitled());

        let next = PaymentState::Loaded {
            has_paid,
            is_pro,
            payment: payment.filter(|_| has_paid),
            subscription: subscription.filter(|_| is_pro),
        };
        self.set_state(next.clone());
        info!(has_paid, is_pro, "Payment status loaded");
        next
    }

    /// Verify a payment or subscription flow, then reload status.
    ///
    /// The reload happens unconditionally, regardless of the gateway's
    /// outcome, so displayed state always reflects the store's latest
    /// content even on verification failure.
    ///
    /// Notifications are scoped to checkout returns: a routine refresh
    /// publishes nothing, in either direction. A refresh is a no-op replay
    /// most of the time and must not toast on every page focus.
    pub async fn verify_payment_status(
        &self,
        payment_initiated: bool,
        is_subscription: bool,
    ) -> bool {
        let verified = self
            .gateway
            .verify_payment(payment_initiated, is_subscription)
            .await;

        let state = self.load_payment_status();

        if !payment_initiated {
            return verified;
        }

        // A verified outcome only reads as success when it actually
        // entitles: a lapsed subscription is persisted (terminal state
        // known) without granting anything.
        let entitled = if is_subscription {
            state.is_pro()
        } else {
            state.has_paid()
        };

        if verified && entitled {
            let event = if is_subscription {
                GateEvent::SubscriptionVerified {
                    subscription_id: state
                        .subscription_details()
                        .map(|s| s.subscription_id.clone())
                        .unwrap_or_default(),
                }
            } else {
                GateEvent::PaymentVerified {
                    payment_id: state
                        .payment_details()
                        .map(|p| p.payment_id.clone())
                        .unwrap_or_default(),
                }
            };
            self.bus.publish(event).await;
        } else {
            let reason = if verified && is_subscription {
                "Your subscription is not active. Renew it to regain access.".to_string()
            } else {
                "We could not confirm your payment. You were not charged twice; \
                 please retry or contact support."
                    .to_string()
            };
            self.bus
                .publish(GateEvent::VerificationFailed {
                    is_subscription,
                    reason,
                })
                .await;
        }

        verified
    }

    /// Clear payment and subscription records, then reload.
    ///
    /// Support/test escape hatch. Does NOT revoke the access code;
    /// revocation is the Access Control Coordinator's concern.
    pub async fn reset_payment(&self) {
        if let Err(e) = self.store.clear_payment_record() {
            warn!(error = %e, "Failed to clear payment record");
        }
        if let Err(e) = self.store.clear_subscription_record() {
            warn!(error = %e, "Failed to clear subscription record");
        }
        self.bus.publish(GateEvent::EntitlementReset).await;
        self.load_payment_status();
    }
}
