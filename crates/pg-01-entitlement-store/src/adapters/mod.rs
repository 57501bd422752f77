//! # Storage Adapters
//!
//! Implementations of the `KeyValueStore` port.
//!
//! - `memory` - RwLock-backed HashMap for tests and ephemeral sessions
//! - `file` - JSON file with atomic temp-file replacement for durability

pub mod file;
pub mod memory;
