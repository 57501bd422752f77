//! # PromptGate Test Suite
//!
//! Unified test crate for cross-subsystem scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem gating choreography
//!     ├── gating_flows.rs   # Redemption, payment and revocation flows
//!     └── persistence.rs    # Entitlement survival across session restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pg-tests
//!
//! # By category
//! cargo test -p pg-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
