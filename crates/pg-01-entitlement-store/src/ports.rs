//! # Ports (Driven Ports)
//!
//! Dependencies required by the entitlement store service.
//!
//! These are the interfaces this library requires the host application to
//! implement. Adapters live in `adapters/`.

use crate::errors::StoreError;
use shared_types::Timestamp;

/// Abstract interface for key-value storage operations.
///
/// Values are serialized record strings under conceptual keys
/// (`access_code`, `payment_record`, `subscription_record`).
///
/// Methods take `&self`; adapters use interior locking. Reads and writes are
/// synchronous and effectively instantaneous; no operation suspends.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Put a key-value pair, replacing any existing value.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key. Deleting an absent key is a no-op.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StoreError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source_is_nonzero() {
        let ts = SystemTimeSource.now();
        assert!(ts > 1_600_000_000);
    }
}
