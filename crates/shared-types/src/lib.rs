//! # Shared Types Crate
//!
//! This crate contains the entitlement domain entities shared across all
//! PromptGate subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem record types are
//!   defined here.
//! - **Store Owns the Records**: `PaymentRecord` and `SubscriptionRecord`
//!   are owned by the Persistent Entitlement Store; coordinators treat them
//!   as read-only snapshots.

pub mod entities;

pub use entities::*;
