//! # Core Domain Entities
//!
//! Defines the entitlement records persisted by the store and the access
//! code value object used throughout the gating flow.
//!
//! ## Clusters
//!
//! - **Entitlement**: `AccessCode`
//! - **Payments**: `PaymentRecord`, `PlanKind`
//! - **Subscriptions**: `SubscriptionRecord`, `SubscriptionStatus`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unix timestamp in seconds since epoch.
pub type Timestamp = u64;

/// Prefix carried by every access code.
pub const ACCESS_CODE_PREFIX: &str = "AC";

/// Minimum length of the payment-reference segment.
pub const MIN_REF_LEN: usize = 8;

/// Minimum length of the trailing suffix segment.
pub const MIN_SUFFIX_LEN: usize = 9;

// =============================================================================
// CLUSTER A: ENTITLEMENT
// =============================================================================

/// A token proving entitlement to use the product.
///
/// Format: `AC-<payment ref>-<suffix>` where the payment ref is 8+ uppercase
/// alphanumerics and the suffix is 9+ uppercase alphanumerics. Input is
/// case-insensitive; codes are always stored and compared in canonical
/// (trimmed, uppercased) form.
///
/// At most one code is "current" per session at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessCode(String);

impl AccessCode {
    /// Canonicalize raw user input: trim surrounding whitespace, uppercase.
    #[must_use]
    pub fn canonicalize(input: &str) -> String {
        input.trim().to_uppercase()
    }

    /// Parse canonicalized input into an `AccessCode`.
    ///
    /// Returns `None` when the canonical form does not satisfy the
    /// acceptance predicate. This is the only constructor; an `AccessCode`
    /// value is well-formed by construction.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let canonical = Self::canonicalize(input);
        if Self::is_well_formed(&canonical) {
            Some(Self(canonical))
        } else {
            None
        }
    }

    /// The acceptance predicate: `AC-<8+ upper alnum>-<9+ upper alnum>`.
    ///
    /// Pure and local. Access codes are self-certifying once issued, which
    /// bounds trust to whoever issued the code.
    #[must_use]
    pub fn is_well_formed(canonical: &str) -> bool {
        let mut parts = canonical.split('-');
        let (Some(prefix), Some(reference), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        prefix == ACCESS_CODE_PREFIX
            && reference.len() >= MIN_REF_LEN
            && suffix.len() >= MIN_SUFFIX_LEN
            && is_upper_alnum(reference)
            && is_upper_alnum(suffix)
    }

    /// The canonical string form of this code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The payment-reference segment (between the two dashes).
    #[must_use]
    pub fn payment_ref(&self) -> &str {
        // Well-formed by construction: three segments exist.
        self.0.split('-').nth(1).unwrap_or_default()
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_upper_alnum(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}

// =============================================================================
// CLUSTER B: PAYMENTS
// =============================================================================

/// Marker distinguishing a one-time purchase from a recurring plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// Single completed purchase.
    #[default]
    OneTime,
    /// Recurring plan settled through the subscription flow.
    Recurring,
}

/// A single completed one-time purchase.
///
/// Owned by the Persistent Entitlement Store; read-only to coordinators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Identifier assigned by the external payment authority.
    pub payment_id: String,
    /// Purchaser email, when the authority reported one.
    pub email: Option<String>,
    /// When the payment was recorded locally.
    pub timestamp: Timestamp,
    /// One-time vs. recurring marker.
    pub plan: PlanKind,
}

// =============================================================================
// CLUSTER C: SUBSCRIPTIONS
// =============================================================================

/// Lifecycle status of a recurring subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Entitlement is live.
    Active,
    /// Renewal lapsed without cancellation.
    Expired,
    /// Explicitly cancelled by the subscriber.
    Cancelled,
}

impl SubscriptionStatus {
    /// Whether this status still satisfies entitlement.
    #[must_use]
    pub fn is_entitled(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Recurring entitlement, distinct from a one-time `PaymentRecord`.
///
/// A session holds at most one of each simultaneously; either independently
/// satisfies access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// Identifier assigned by the external payment authority.
    pub subscription_id: String,
    /// Current lifecycle status.
    pub status: SubscriptionStatus,
    /// When the subscription next renews (or last renewed).
    pub renewal_timestamp: Timestamp,
}
