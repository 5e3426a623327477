//! Error types for the user store.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in the user store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be interpreted.
    #[error("invalid stored value: {0}")]
    Corrupt(String),

    /// Filesystem error while opening the store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
