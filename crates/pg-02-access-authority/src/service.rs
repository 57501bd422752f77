//! # Access Code Authority Service
//!
//! The main service implementing redemption, synthesis and revocation over
//! the Persistent Entitlement Store.

use crate::domain::synthesize_code;
use crate::errors::AccessError;
use pg_01_entitlement_store::{EntitlementStore, KeyValueStore};
use shared_types::AccessCode;
use std::sync::Arc;
use tracing::{debug, warn};

/// The Access Code Authority.
///
/// All reads recompute from current store contents; nothing here caches
/// entitlement across calls.
pub struct AccessCodeAuthority<KV>
where
    KV: KeyValueStore,
{
    store: Arc<EntitlementStore<KV>>,
}

impl<KV> AccessCodeAuthority<KV>
where
    KV: KeyValueStore,
{
    /// Create an authority over the given store.
    pub fn new(store: Arc<EntitlementStore<KV>>) -> Self {
        Self { store }
    }

    /// The stored code when it passes the acceptance predicate, `None`
    /// when absent or malformed. Pure read, no side effect. Store failures
    /// surface so the caller can degrade explicitly.
    pub fn current_valid_code(&self) -> Result<Option<AccessCode>, AccessError> {
        // Well-formed by construction, but the store may hold a value
        // written by an older build; re-check the predicate.
        Ok(self
            .store
            .access_code()?
            .filter(|code| AccessCode::is_well_formed(code.as_str())))
    }

    /// True iff a stored access code exists and passes the acceptance
    /// predicate. Store failures degrade to `false` with a logged warning.
    #[must_use]
    pub fn has_valid_access(&self) -> bool {
        match self.current_valid_code() {
            Ok(code) => code.is_some(),
            Err(e) => {
                warn!(error = %e, "Store unreadable, treating access as absent");
                false
            }
        }
    }

    /// The stored code, verbatim. Store failures degrade to `None`.
    #[must_use]
    pub fn user_access_code(&self) -> Option<AccessCode> {
        match self.store.access_code() {
            Ok(code) => code,
            Err(e) => {
                warn!(error = %e, "Store unreadable, no access code available");
                None
            }
        }
    }

    /// Canonicalize and redeem a user-submitted code.
    ///
    /// Returns `Ok(true)` and persists the code as current when the
    /// canonical form passes the acceptance predicate. Redemption is
    /// idempotent: redeeming an already-stored valid code is a no-op
    /// success. On a predicate failure the store is left untouched and
    /// `Ok(false)` is returned; `Err` is reserved for store failures.
    ///
    /// Empty or whitespace-only input is rejected before contacting
    /// storage.
    pub fn validate_access_code(&self, input: &str) -> Result<bool, AccessError> {
        if input.trim().is_empty() {
            return Err(AccessError::EmptyInput);
        }

        let Some(code) = AccessCode::parse(input) else {
            debug!("Submitted code failed the acceptance predicate");
            return Ok(false);
        };

        // Idempotent redemption: same code already current means no write.
        if self.store.access_code()?.as_ref() == Some(&code) {
            debug!(code = %code, "Code already redeemed for this session");
            return Ok(true);
        }

        self.store.set_access_code(&code)?;
        debug!(code = %code, "Access code redeemed");
        Ok(true)
    }

    /// Synthesize, persist and return the code bound to `payment_id`.
    ///
    /// Synthesis is deterministic: the same payment id mints the same code
    /// on replay, preventing duplicate-entitlement drift from repeated
    /// verification calls. An empty payment id is `EmptyInput` (caller
    /// problem); `Synthesis` is reserved for a failed store write.
    pub fn store_access_code(
        &self,
        payment_id: &str,
        email: Option<&str>,
    ) -> Result<AccessCode, AccessError> {
        let code = synthesize_code(payment_id, email).ok_or(AccessError::EmptyInput)?;

        self.store
            .set_access_code(&code)
            .map_err(|e| AccessError::Synthesis {
                reason: e.to_string(),
            })?;

        debug!(code = %code, payment_id, "Access code synthesized from payment");
        Ok(code)
    }

    /// Clear the stored access code only.
    ///
    /// Payment and subscription records are untouched; revocation of access
    /// is distinct from deleting payment history. The code itself remains
    /// redeemable later (local-only logout).
    pub fn clear_access(&self) -> Result<(), AccessError> {
        self.store.clear_access_code()?;
        debug!("Access code cleared");
        Ok(())
    }
}
