//! # Resource
//!
//! The value type published by every synchronizer session.
//!
//! A `Resource<T>` is the *state* of a piece of data as seen by an observer:
//! still loading, loaded, or failed. Each variant carries the best-known value
//! so a UI can keep showing cached data while a refresh is in flight or after
//! it failed.
//!
//! Resources are never mutated in place. Every state transition produces a new
//! value, and equality is structural (tag + payload) so observers can skip
//! duplicates.

use crate::framework::error::SyncError;

/// The tag of a [`Resource`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Loading,
    Success,
    Error,
}

/// Tagged state of a value: loading, success, or error.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    /// A fetch may still be in flight. `data` is whatever the cache holds (may be absent).
    Loading { data: Option<T> },
    /// Terminal success, or a cache update observed after it.
    Success { data: T },
    /// Terminal failure. `data` is the last value seen in the cache before the failure.
    Error { error: SyncError, data: Option<T> },
}

impl<T> Resource<T> {
    pub fn loading(data: Option<T>) -> Self {
        Resource::Loading { data }
    }

    pub fn success(data: T) -> Self {
        Resource::Success { data }
    }

    /// Builds an error resource.
    ///
    /// Plain strings convert into [`SyncError::Fetch`], so
    /// `Resource::error("network unreachable", None)` is a fetch failure.
    pub fn error(error: impl Into<SyncError>, data: Option<T>) -> Self {
        Resource::Error {
            error: error.into(),
            data,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Resource::Loading { .. } => Status::Loading,
            Resource::Success { .. } => Status::Success,
            Resource::Error { .. } => Status::Error,
        }
    }

    /// The best-known value, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Loading { data } | Resource::Error { data, .. } => data.as_ref(),
            Resource::Success { data } => Some(data),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Resource::Loading { data } | Resource::Error { data, .. } => data,
            Resource::Success { data } => Some(data),
        }
    }

    pub fn error_kind(&self) -> Option<&SyncError> {
        match self {
            Resource::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Caller-facing error text. `None` unless this is an error.
    pub fn message(&self) -> Option<String> {
        self.error_kind().map(ToString::to_string)
    }

    /// Success and error are terminal; loading is not.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Resource::Loading { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Resource::Loading { data } => Resource::Loading { data: data.map(f) },
            Resource::Success { data } => Resource::Success { data: f(data) },
            Resource::Error { error, data } => Resource::Error {
                error,
                data: data.map(f),
            },
        }
    }
}
