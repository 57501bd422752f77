//! # Persistent Entitlement Store (pg-01)
//!
//! The authoritative persistence layer for entitlement state. Holds three
//! independently addressable records that survive session restarts:
//!
//! | Key | Record |
//! |-----|--------|
//! | `access_code` | The current [`shared_types::AccessCode`] |
//! | `payment_record` | One-time purchase ([`shared_types::PaymentRecord`]) |
//! | `subscription_record` | Recurring plan ([`shared_types::SubscriptionRecord`]) |
//!
//! ## Consistency Model
//!
//! There is NO transactional guarantee across the three records. A process
//! crash between writes can leave them inconsistent; downstream consumers
//! recompute entitlement from current store contents on every check, so
//! partial-write interleavings self-correct on the next pass.
//!
//! `clear_all()` removes all three records within a single call; subsequent
//! reads in the same process never observe a partial clear.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `ports` - Port traits (`KeyValueStore`, `TimeSource`)
//! - `adapters/` - In-memory and file-backed adapters
//! - `service` - Typed `EntitlementStore` over the raw key-value port
//!
//! ## Usage
//!
//! ```ignore
//! use pg_01_entitlement_store::{EntitlementStore, InMemoryKVStore};
//!
//! let store = EntitlementStore::new(InMemoryKVStore::new());
//! store.set_access_code(&code)?;
//! assert!(store.access_code()?.is_some());
//! store.clear_all()?;
//! ```

pub mod adapters;
pub mod errors;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::file::FileBackedKVStore;
pub use adapters::memory::InMemoryKVStore;
pub use errors::StoreError;
pub use ports::{KeyValueStore, SystemTimeSource, TimeSource};
pub use service::{keys, EntitlementStore};
