//! # Ports (Driven Ports)
//!
//! The contract this core requires from the external payment authority.
//! The authority's wire format is out of scope; adapters translate it into
//! these outcome types.

use async_trait::async_trait;
use shared_types::{PlanKind, SubscriptionStatus, Timestamp};
use thiserror::Error;

/// Errors from the external payment authority.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    /// The authority could not be reached. Treated identically to an
    /// explicit failure: no entitlement is granted.
    #[error("Payment authority unreachable: {detail}")]
    Unreachable { detail: String },

    /// The authority answered and reported no completed payment.
    #[error("Payment not confirmed: {reason}")]
    Declined { reason: String },
}

/// A confirmed one-time payment as reported by the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
    /// Authority-assigned payment identifier.
    pub payment_id: String,
    /// Purchaser email, when reported.
    pub email: Option<String>,
    /// One-time vs. recurring marker.
    pub plan: PlanKind,
}

/// A confirmed subscription as reported by the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionOutcome {
    /// Authority-assigned subscription identifier.
    pub subscription_id: String,
    /// Lifecycle status at the time of the check.
    pub status: SubscriptionStatus,
    /// Next (or last) renewal timestamp.
    pub renewal_timestamp: Timestamp,
    /// Subscriber email, when reported.
    pub email: Option<String>,
}

/// Abstract interface to the external payment authority.
///
/// `payment_initiated` distinguishes "user just returned from checkout"
/// (the authority must resolve to a terminal state, no indefinite pending)
/// from "routine status refresh". Timeout policy is delegated to the
/// adapter's transport; the gateway imposes none.
#[async_trait]
pub trait PaymentAuthority: Send + Sync {
    /// Query the outcome of a one-time checkout flow.
    async fn check_payment(&self, payment_initiated: bool)
        -> Result<PaymentOutcome, AuthorityError>;

    /// Query the outcome of a subscription checkout flow.
    async fn check_subscription(
        &self,
        payment_initiated: bool,
    ) -> Result<SubscriptionOutcome, AuthorityError>;
}
