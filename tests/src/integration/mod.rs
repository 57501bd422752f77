//! Cross-subsystem integration scenarios.

pub mod gating_flows;
pub mod persistence;
