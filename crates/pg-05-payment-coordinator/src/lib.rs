//! # Payment Status Coordinator (pg-05)
//!
//! Session-scoped state machine mirroring the presence of payment and
//! subscription records in the Persistent Entitlement Store.
//!
//! ## State Machine
//!
//! ```text
//! Loading ──load──→ Loaded { has_paid, is_pro }
//! ```
//!
//! `has_paid` and `is_pro` are independent booleans, not mutually
//! exclusive. Detail objects are populated only when the matching flag is
//! true, so a stale record never leaks through an absent entitlement.
//!
//! Verification delegates to the Payment Verification Gateway (pg-03) and
//! then unconditionally reloads from the store, so displayed state always
//! reflects the store's latest content even on verification failure.

pub mod coordinator;
pub mod state;

// Re-export key types for convenience
pub use coordinator::PaymentCoordinator;
pub use state::PaymentState;
