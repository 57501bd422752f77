use thiserror::Error;

/// Errors from the persistent entitlement store.
///
/// Consumers degrade on these (treat the record as absent, deny access)
/// rather than crash; no store failure propagates past the coordinator
/// boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Serialization error for key {key}: {message}")]
    Serialization { key: String, message: String },
}
