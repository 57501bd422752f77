//! # Authority Adapters
//!
//! Controllable `PaymentAuthority` implementations for unit and integration
//! tests. Production wires an HTTP adapter owned by the host application.

use crate::ports::{AuthorityError, PaymentAuthority, PaymentOutcome, SubscriptionOutcome};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

/// Scripted authority returning fixed outcomes.
///
/// Unconfigured flows answer `Declined`, matching an authority that has no
/// completed checkout on record.
#[derive(Default)]
pub struct StaticPaymentAuthority {
    payment: Option<PaymentOutcome>,
    subscription: Option<SubscriptionOutcome>,
    calls: AtomicU64,
}

impl StaticPaymentAuthority {
    /// Authority that declines everything.
    #[must_use]
    pub fn declining() -> Self {
        Self::default()
    }

    /// Authority that confirms the given one-time payment.
    #[must_use]
    pub fn with_payment(outcome: PaymentOutcome) -> Self {
        Self {
            payment: Some(outcome),
            ..Self::default()
        }
    }

    /// Authority that confirms the given subscription.
    #[must_use]
    pub fn with_subscription(outcome: SubscriptionOutcome) -> Self {
        Self {
            subscription: Some(outcome),
            ..Self::default()
        }
    }

    /// Number of round-trips made against this authority.
    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PaymentAuthority for StaticPaymentAuthority {
    async fn check_payment(
        &self,
        _payment_initiated: bool,
    ) -> Result<PaymentOutcome, AuthorityError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.payment.clone().ok_or(AuthorityError::Declined {
            reason: "no completed payment on record".to_string(),
        })
    }

    async fn check_subscription(
        &self,
        _payment_initiated: bool,
    ) -> Result<SubscriptionOutcome, AuthorityError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.subscription.clone().ok_or(AuthorityError::Declined {
            reason: "no subscription on record".to_string(),
        })
    }
}

/// Authority that can never be reached.
#[derive(Default)]
pub struct UnreachablePaymentAuthority;

#[async_trait]
impl PaymentAuthority for UnreachablePaymentAuthority {
    async fn check_payment(
        &self,
        _payment_initiated: bool,
    ) -> Result<PaymentOutcome, AuthorityError> {
        Err(AuthorityError::Unreachable {
            detail: "connection refused".to_string(),
        })
    }

    async fn check_subscription(
        &self,
        _payment_initiated: bool,
    ) -> Result<SubscriptionOutcome, AuthorityError> {
        Err(AuthorityError::Unreachable {
            detail: "connection refused".to_string(),
        })
    }
}
