//! # Access Code Authority (pg-02)
//!
//! Decides whether a code proves entitlement, redeems user-submitted codes,
//! and synthesizes new codes from completed payments.
//!
//! ## Role in System
//!
//! - **Acceptance Predicate**: pure and local, no network round-trip. Codes
//!   are self-certifying once issued, which bounds this component's trust to
//!   "whoever issued the code".
//! - **Deterministic Synthesis**: the same payment id always mints the same
//!   code, so replayed verification calls converge instead of drifting into
//!   duplicate entitlement.
//! - **Recomputed, Never Cached**: `has_valid_access` re-reads the store on
//!   every call; a partial write (payment record without a code) self-heals
//!   once the synthesis step completes.
//!
//! ## Crate Structure
//!
//! - `domain` - canonicalization and synthesis rules
//! - `service` - `AccessCodeAuthority` over the entitlement store
//! - `errors` - `AccessError`

pub mod domain;
pub mod errors;
pub mod service;

// Re-export key types for convenience
pub use domain::synthesize_code;
pub use errors::AccessError;
pub use service::AccessCodeAuthority;
