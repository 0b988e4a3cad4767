//! # Remote Fetch Outcomes
//!
//! A remote fetcher is any stream of [`ApiResponse`] items: zero or more
//! `Loading` progress notifications followed by exactly one `Success` or
//! `Failure`. Most fetchers are a single request, so [`from_future`] wraps one
//! future into a one-item stream.

use futures::stream::{self, BoxStream, StreamExt};
use futures::{Future, FutureExt};
use std::fmt::Display;

/// One notification from the remote side of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<R> {
    /// Progress report. The session republishes the last cached value as loading.
    Loading,
    Success(R),
    Failure(String),
}

impl<R> ApiResponse<R> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApiResponse::Loading)
    }
}

impl<R, E: Display> From<Result<R, E>> for ApiResponse<R> {
    fn from(result: Result<R, E>) -> Self {
        match result {
            Ok(payload) => ApiResponse::Success(payload),
            Err(e) => ApiResponse::Failure(e.to_string()),
        }
    }
}

/// Boxed fetch stream, as stored by the synchronizer.
pub type FetchStream<R> = BoxStream<'static, ApiResponse<R>>;

/// Turns a single request future into a fetch stream with one terminal item.
pub fn from_future<R, E, F>(request: F) -> FetchStream<R>
where
    R: Send + 'static,
    E: Display + 'static,
    F: Future<Output = Result<R, E>> + Send + 'static,
{
    stream::once(request.map(ApiResponse::from)).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_future_yields_single_outcome() {
        let ok: Vec<ApiResponse<u32>> = from_future(async { Ok::<_, String>(7) }).collect().await;
        assert_eq!(ok, vec![ApiResponse::Success(7)]);

        let err: Vec<ApiResponse<u32>> =
            from_future(async { Err::<u32, _>("timed out".to_string()) })
                .collect()
                .await;
        assert_eq!(err, vec![ApiResponse::Failure("timed out".to_string())]);
    }

    #[tokio::test]
    async fn test_from_future_accepts_catalog_errors() {
        let request = async {
            Err::<Vec<u32>, _>(crate::api::ApiError::Status {
                code: 404,
                message: "Not Found".to_string(),
            })
        };
        let fetch: FetchStream<Vec<u32>> = from_future(request);
        let seen: Vec<_> = fetch.collect().await;
        assert_eq!(seen, vec![ApiResponse::Failure("HTTP 404: Not Found".to_string())]);
    }

    #[test]
    fn test_loading_is_not_terminal() {
        assert!(!ApiResponse::<()>::Loading.is_terminal());
        assert!(ApiResponse::Success(()).is_terminal());
        assert!(ApiResponse::<()>::Failure("x".into()).is_terminal());
    }
}
