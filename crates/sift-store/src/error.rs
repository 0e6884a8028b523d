/// Errors from backing-store operations.
///
/// Absence is deliberately not represented here: lookups of unknown keys
/// return `Ok(None)`. An error means the backend itself failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend failed to service the request.
    #[error("backing store fault: {0}")]
    Fault(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
