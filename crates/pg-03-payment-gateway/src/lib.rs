//! # Payment Verification Gateway (pg-03)
//!
//! Reconciles a pending payment or subscription flow with the external
//! payment authority and yields a terminal success/failure.
//!
//! ## Role in System
//!
//! ```text
//! [Payment Coordinator (5)] ──verify──→ [Gateway (3)] ──round-trip──→ [Authority]
//!                                            │ on success
//!                                            ├─ persist record   → [Store (1)]
//!                                            └─ mint/refresh code → [Authority (2)]
//! ```
//!
//! The authority round-trip is the only suspension point in the core.
//! Concurrent verifications are NOT serialized; the deterministic code
//! synthesis in pg-02 is the safeguard against double-entitlement, not
//! mutual exclusion. "No response" is treated identically to explicit
//! failure: return false, grant nothing.
//!
//! ## Crate Structure
//!
//! - `ports` - `PaymentAuthority` port and outcome types
//! - `adapters` - scripted and unreachable authorities for tests
//! - `service` - `PaymentGateway`

pub mod adapters;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{StaticPaymentAuthority, UnreachablePaymentAuthority};
pub use ports::{AuthorityError, PaymentAuthority, PaymentOutcome, SubscriptionOutcome};
pub use service::PaymentGateway;
