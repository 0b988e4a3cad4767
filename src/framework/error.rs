//! # Synchronizer Errors
//!
//! Errors a session can end with. They travel inside [`Resource::Error`](crate::framework::Resource)
//! rather than through `Result`, so they are `Clone + PartialEq` and hold text
//! instead of the original error values.

/// Boxed error returned by persisters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a synchronizer session ended in an error state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The remote call failed or returned a non-success status.
    #[error("{0}")]
    Fetch(String),
    /// The fetch succeeded but writing the payload into the cache failed.
    #[error("Persist failed: {0}")]
    Persist(String),
    /// The cache stream ended before producing its first value.
    #[error("Cache closed before producing a value")]
    CacheClosed,
}

impl SyncError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, SyncError::Fetch(_))
    }

    pub fn is_persist(&self) -> bool {
        matches!(self, SyncError::Persist(_))
    }
}

impl From<String> for SyncError {
    fn from(message: String) -> Self {
        SyncError::Fetch(message)
    }
}

impl From<&str> for SyncError {
    fn from(message: &str) -> Self {
        SyncError::Fetch(message.to_string())
    }
}
