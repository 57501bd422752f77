//! # Gating Events
//!
//! Defines all event types that flow through the shared bus, and their
//! rendering into user-facing notifications.

use serde::{Deserialize, Serialize};
use shared_types::AccessCode;

/// How an access grant was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantSource {
    /// User redeemed a pre-existing code.
    CodeRedemption,
    /// Code was synthesized from a completed payment.
    Payment,
}

/// All events that can be published to the notification bus.
///
/// Every state transition with a user-visible cause (grant, denial, revoke,
/// verification error) emits exactly one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GateEvent {
    // =========================================================================
    // ACCESS CONTROL COORDINATOR (pg-04)
    // =========================================================================
    /// Access was granted for this session.
    AccessGranted {
        /// The code now current for the session.
        code: AccessCode,
        /// Redemption or payment-triggered grant.
        source: GrantSource,
    },

    /// A submitted code failed validation. No state changed.
    CodeRejected {
        /// User-correctable reason (format, unrecognized).
        reason: String,
    },

    /// Access was explicitly revoked (logout/reset).
    AccessRevoked,

    // =========================================================================
    // PAYMENT STATUS COORDINATOR (pg-05)
    // =========================================================================
    /// A one-time payment was confirmed by the external authority.
    PaymentVerified {
        /// Authority-assigned payment identifier.
        payment_id: String,
    },

    /// A subscription was confirmed by the external authority.
    SubscriptionVerified {
        /// Authority-assigned subscription identifier.
        subscription_id: String,
    },

    /// Verification did not grant entitlement: the authority failed, was
    /// unreachable, or reported a lapsed subscription.
    VerificationFailed {
        /// Whether the subscription flow (vs. one-time) was being verified.
        is_subscription: bool,
        /// Failure description.
        reason: String,
    },

    /// Payment and subscription records were cleared (support escape hatch).
    EntitlementReset,

    // =========================================================================
    // DEGRADED CONDITIONS (logged, not user-actionable)
    // =========================================================================
    /// The entitlement store was unreadable; access degraded to denied.
    StoreDegraded {
        /// Failure description.
        detail: String,
    },
}

impl GateEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::AccessGranted { .. } | Self::CodeRejected { .. } | Self::AccessRevoked => {
                EventTopic::AccessControl
            }
            Self::PaymentVerified { .. }
            | Self::SubscriptionVerified { .. }
            | Self::VerificationFailed { .. }
            | Self::EntitlementReset => EventTopic::Payments,
            Self::StoreDegraded { .. } => EventTopic::Degraded,
        }
    }

    /// Render this event for the toast layer.
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Self::AccessGranted { source, .. } => Notification {
                title: "Access granted".into(),
                description: match source {
                    GrantSource::CodeRedemption => "Your access code was accepted.".into(),
                    GrantSource::Payment => "Payment confirmed. Welcome aboard!".into(),
                },
                variant: NotificationVariant::Normal,
            },
            Self::CodeRejected { reason } => Notification {
                title: "Invalid access code".into(),
                description: reason.clone(),
                variant: NotificationVariant::Destructive,
            },
            Self::AccessRevoked => Notification {
                title: "Logged out".into(),
                description: "Your access code was cleared for this session.".into(),
                variant: NotificationVariant::Normal,
            },
            Self::PaymentVerified { .. } => Notification {
                title: "Payment verified".into(),
                description: "Your purchase was confirmed.".into(),
                variant: NotificationVariant::Normal,
            },
            Self::SubscriptionVerified { .. } => Notification {
                title: "Subscription verified".into(),
                description: "Your subscription is active.".into(),
                variant: NotificationVariant::Normal,
            },
            Self::VerificationFailed { reason, .. } => Notification {
                title: "Verification failed".into(),
                description: reason.clone(),
                variant: NotificationVariant::Destructive,
            },
            Self::EntitlementReset => Notification {
                title: "Payment status reset".into(),
                description: "Stored payment and subscription records were cleared.".into(),
                variant: NotificationVariant::Normal,
            },
            Self::StoreDegraded { detail } => Notification {
                title: "Storage unavailable".into(),
                description: detail.clone(),
                variant: NotificationVariant::Destructive,
            },
        }
    }
}

/// Severity hint for the toast layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    /// Informational toast.
    Normal,
    /// Error toast.
    Destructive,
}

/// A rendered user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short headline.
    pub title: String,
    /// One-line detail.
    pub description: String,
    /// Presentation severity.
    pub variant: NotificationVariant,
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Access Control Coordinator events.
    AccessControl,
    /// Payment Status Coordinator events.
    Payments,
    /// Degraded-storage conditions.
    Degraded,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &GateEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
