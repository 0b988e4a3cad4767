//! # Store Errors
//!
//! Errors returned by [`CacheClient`](crate::store::CacheClient) calls.

/// Errors that can occur while talking to a cache actor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
}
