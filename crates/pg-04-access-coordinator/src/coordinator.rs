//! # Access Control Coordinator
//!
//! Orchestrates checks, redemption and revocation against the Access Code
//! Authority, and publishes user-facing notifications for every transition
//! with a visible cause.

use crate::state::AccessState;
use pg_01_entitlement_store::KeyValueStore;
use pg_02_access_authority::{AccessCodeAuthority, AccessError};
use shared_bus::{GateEvent, GrantSource, NotificationPublisher};
use shared_types::AccessCode;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// The Access Control Coordinator.
///
/// One per logical session. All failures are caught at this boundary and
/// converted to a boolean/`Option` result plus a published notification.
pub struct AccessCoordinator<KV, B>
where
    KV: KeyValueStore,
    B: NotificationPublisher,
{
    authority: Arc<AccessCodeAuthority<KV>>,
    bus: Arc<B>,
    state: RwLock<AccessState>,
}

impl<KV, B> AccessCoordinator<KV, B>
where
    KV: KeyValueStore,
    B: NotificationPublisher,
{
    /// Create a coordinator in the `Unknown` state (loading).
    pub fn new(authority: Arc<AccessCodeAuthority<KV>>, bus: Arc<B>) -> Self {
        Self {
            authority,
            bus,
            state: RwLock::new(AccessState::Unknown),
        }
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn state(&self) -> AccessState {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or(AccessState::Denied)
    }

    /// Whether the session is currently authorized.
    #[must_use]
    pub fn has_access(&self) -> bool {
        self.state().has_access()
    }

    /// Whether the initial check has not yet completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    /// The code backing the current grant, if any.
    #[must_use]
    pub fn current_code(&self) -> Option<AccessCode> {
        self.state().current_code().cloned()
    }

    fn set_state(&self, next: AccessState) {
        if let Ok(mut state) = self.state.write() {
            *state = next;
        }
    }

    /// Re-read the store and transition to `Granted` or `Denied`.
    ///
    /// Entitlement is recomputed from current store contents, never served
    /// from the cached state, so partial writes self-heal here. Never fails
    /// outward: a store failure degrades to `Denied` with a logged
    /// condition.
    pub async fn check_access_status(&self) -> bool {
        self.set_state(AccessState::Checking);

        match self.authority.current_valid_code() {
            Ok(Some(code)) => {
                info!(code = %code, "Access check: granted");
                self.set_state(AccessState::Granted { code });
                true
            }
            Ok(None) => {
                info!("Access check: denied");
                self.set_state(AccessState::Denied);
                false
            }
            Err(e) => {
                warn!(error = %e, "Access check degraded to denied");
                self.set_state(AccessState::Denied);
                self.bus
                    .publish(GateEvent::StoreDegraded {
                        detail: e.to_string(),
                    })
                    .await;
                false
            }
        }
    }

    /// Redeem a user-submitted code.
    ///
    /// On success transitions to `Granted`, caches the canonical code and
    /// publishes a success notification; on failure the current state is
    /// kept and a failure notification is published. The boolean outcome is
    /// returned so a submission dialog can close only on success.
    pub async fn validate_code(&self, input: &str) -> bool {
        match self.authority.validate_access_code(input) {
            Ok(true) => {
                // The authority just persisted the canonical form.
                let Some(code) = self.authority.user_access_code() else {
                    // Redeemed but unreadable back; treat as a store fault.
                    self.bus
                        .publish(GateEvent::StoreDegraded {
                            detail: "redeemed code could not be read back".to_string(),
                        })
                        .await;
                    return false;
                };
                info!(code = %code, "Code redeemed, access granted");
                self.set_state(AccessState::Granted { code: code.clone() });
                self.bus
                    .publish(GateEvent::AccessGranted {
                        code,
                        source: GrantSource::CodeRedemption,
                    })
                    .await;
                true
            }
            Ok(false) => {
                self.bus
                    .publish(GateEvent::CodeRejected {
                        reason: "That code is not in a recognized format.".to_string(),
                    })
                    .await;
                false
            }
            Err(AccessError::EmptyInput) => {
                self.bus
                    .publish(GateEvent::CodeRejected {
                        reason: "Enter an access code.".to_string(),
                    })
                    .await;
                false
            }
            Err(e) => {
                warn!(error = %e, "Code redemption hit a store failure");
                self.bus
                    .publish(GateEvent::StoreDegraded {
                        detail: e.to_string(),
                    })
                    .await;
                false
            }
        }
    }

    /// Grant access from a completed payment.
    ///
    /// Synthesis cannot fail validation; only the store write can fail, in
    /// which case `None` is returned and the state is unchanged. An empty
    /// payment id is a caller bug, logged without a toast; "storage
    /// unavailable" is reserved for actual store faults.
    pub async fn grant_access(&self, payment_id: &str, email: Option<&str>) -> Option<AccessCode> {
        match self.authority.store_access_code(payment_id, email) {
            Ok(code) => {
                info!(code = %code, payment_id, "Payment-triggered grant");
                self.set_state(AccessState::Granted { code: code.clone() });
                self.bus
                    .publish(GateEvent::AccessGranted {
                        code: code.clone(),
                        source: GrantSource::Payment,
                    })
                    .await;
                Some(code)
            }
            Err(AccessError::EmptyInput) => {
                warn!("Grant requested without a payment reference");
                None
            }
            Err(e) => {
                warn!(error = %e, payment_id, "Grant failed; state unchanged");
                self.bus
                    .publish(GateEvent::StoreDegraded {
                        detail: e.to_string(),
                    })
                    .await;
                None
            }
        }
    }

    /// Revoke access for this session. Idempotent.
    ///
    /// Clears the stored code (payment history is untouched) and
    /// transitions to `Denied`. The code itself remains redeemable later:
    /// revocation clears the session pointer, not the code's validity.
    pub async fn revoke_access(&self) {
        if let Err(e) = self.authority.clear_access() {
            // The session still ends; the stale stored code is re-checked
            // (and re-granted) only through an explicit future redemption.
            warn!(error = %e, "Store clear failed during revocation");
            self.bus
                .publish(GateEvent::StoreDegraded {
                    detail: e.to_string(),
                })
                .await;
        }
        info!("Access revoked");
        self.set_state(AccessState::Denied);
        self.bus.publish(GateEvent::AccessRevoked).await;
    }
}
