//! # API Errors

/// Errors returned by a [`CatalogService`](crate::api::CatalogService).
///
/// The `Display` text is what a failed session reports as its fetch error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Timeout, DNS failure, refused connection.
    #[error("{0}")]
    Network(String),
    /// Non-2xx answer. `message` is TMDB's `status_message` when it sent one.
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
