//! # Shared Bus - Notification Channel for the Gating Core
//!
//! The coordinators emit user-facing events here; the presentation layer
//! (toast/UI) subscribes and renders them. The state machines stay free of
//! presentation concerns.
//!
//! ## Observer Pattern
//!
//! ```text
//! ┌─────────────────┐                    ┌──────────────────┐
//! │  Coordinator    │                    │  Toast layer     │
//! │  (4.4 / 4.5)    │    publish()       │  (presentation)  │
//! │                 │ ──────┐            │                  │
//! └─────────────────┘       │            └──────────────────┘
//!                           ▼                    ↑
//!                     ┌──────────────┐          │
//!                     │ Notification │          │
//!                     │     Bus      │ ─────────┘
//!                     └──────────────┘  subscribe()
//! ```
//!
//! Events carry enough structure for filtering (topic, source) and render to
//! a `Notification { title, description, variant }` for display.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{
    EventFilter, EventTopic, GateEvent, GrantSource, Notification, NotificationVariant,
};
pub use publisher::{InMemoryNotificationBus, NotificationPublisher};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 256);
    }
}
