//! # Payment State
//!
//! Named states for the payment status machine.

use shared_types::{PaymentRecord, SubscriptionRecord};

/// Session-scoped payment status. Never persisted; recomputed from the
/// store on every load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentState {
    /// Initial state, before the first store read.
    #[default]
    Loading,
    /// Status derived from current store contents.
    Loaded {
        /// A one-time payment record is on file.
        has_paid: bool,
        /// An active subscription is on file.
        is_pro: bool,
        /// Present only when `has_paid` is true.
        payment: Option<PaymentRecord>,
        /// Present only when `is_pro` is true.
        subscription: Option<SubscriptionRecord>,
    },
}

impl PaymentState {
    /// Whether the first load has not yet completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether a one-time payment is on file.
    #[must_use]
    pub fn has_paid(&self) -> bool {
        matches!(self, Self::Loaded { has_paid: true, .. })
    }

    /// Whether an active subscription is on file.
    #[must_use]
    pub fn is_pro(&self) -> bool {
        matches!(self, Self::Loaded { is_pro: true, .. })
    }

    /// Payment details, populated only when `has_paid`.
    #[must_use]
    pub fn payment_details(&self) -> Option<&PaymentRecord> {
        match self {
            Self::Loaded { payment, .. } => payment.as_ref(),
            Self::Loading => None,
        }
    }

    /// Subscription details, populated only when `is_pro`.
    #[must_use]
    pub fn subscription_details(&self) -> Option<&SubscriptionRecord> {
        match self {
            Self::Loaded { subscription, .. } => subscription.as_ref(),
            Self::Loading => None,
        }
    }
}
