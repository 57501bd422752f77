//! # Access Control Coordinator (pg-04)
//!
//! Session-scoped state machine deciding whether the current session is
//! authorized to use the product.
//!
//! ## State Machine
//!
//! ```text
//! Unknown ──check──→ Checking ──┬──→ Granted ──revoke──→ Denied
//!                               └──→ Denied ──validate/grant──→ Granted
//! ```
//!
//! `Granted → Denied` happens via explicit revocation only; `Denied →
//! Granted` via a successful code redemption or a payment-triggered grant.
//! State is derived from the Persistent Entitlement Store at session start
//! and mutated only through coordinator operations, never written directly.
//!
//! No failure propagates outward: every operation has a defined failure
//! return, and user-visible transitions publish a notification on the
//! shared bus.

pub mod coordinator;
pub mod state;

// Re-export key types for convenience
pub use coordinator::AccessCoordinator;
pub use state::AccessState;
