use pg_01_entitlement_store::StoreError;
use thiserror::Error;

/// Errors from access code operations.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Empty or whitespace-only input (submitted code or payment id),
    /// rejected before touching storage.
    #[error("Access code input is empty")]
    EmptyInput,

    /// Store read/write failed during a grant (synthesis succeeded, the
    /// write did not). The caller treats this as non-fatal but unresolved.
    #[error("Failed to persist synthesized code: {reason}")]
    Synthesis { reason: String },

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
