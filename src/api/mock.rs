//! # Mock Catalog Service
//!
//! A [`CatalogService`] that answers from a queue of expectations, for
//! testing repositories without a network.
//!
//! ```ignore
//! let mock = MockCatalogService::new();
//! mock.expect(Endpoint::MovieKeywords(123))
//!     .return_ok(KeywordListResponse { id: 123, keywords });
//!
//! let service: Arc<dyn CatalogService> = Arc::new(mock.clone());
//! // Use service in tests...
//! mock.verify(); // Ensures all expectations were met
//! ```

use crate::api::error::ApiError;
use crate::api::service::{CatalogService, Endpoint};
use crate::model::network::{
    DiscoverMovieResponse, DiscoverTvResponse, KeywordListResponse, PeopleResponse,
    ReviewListResponse, VideoListResponse,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Any payload a [`CatalogService`] method can return.
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    Keywords(KeywordListResponse),
    Videos(VideoListResponse),
    Reviews(ReviewListResponse),
    Movies(DiscoverMovieResponse),
    Tvs(DiscoverTvResponse),
    People(PeopleResponse),
}

macro_rules! mock_payload {
    ($($variant:ident => $payload:ty),* $(,)?) => {
        $(
            impl From<$payload> for MockResponse {
                fn from(payload: $payload) -> Self {
                    MockResponse::$variant(payload)
                }
            }

            impl TryFrom<MockResponse> for $payload {
                type Error = MockResponse;

                fn try_from(response: MockResponse) -> Result<Self, MockResponse> {
                    match response {
                        MockResponse::$variant(payload) => Ok(payload),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

mock_payload! {
    Keywords => KeywordListResponse,
    Videos => VideoListResponse,
    Reviews => ReviewListResponse,
    Movies => DiscoverMovieResponse,
    Tvs => DiscoverTvResponse,
    People => PeopleResponse,
}

/// An expected request and the answer to give it.
struct Expectation {
    endpoint: Endpoint,
    response: Result<MockResponse, ApiError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<Endpoint>,
}

/// A mock service with expectation tracking for fluent testing.
///
/// Requests must arrive in the order they were expected. An unexpected or
/// out-of-order request panics. Clones share the same queue.
#[derive(Clone, Default)]
pub struct MockCatalogService {
    state: Arc<Mutex<MockState>>,
}

impl MockCatalogService {
    /// Creates a new mock service with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request to `endpoint`.
    pub fn expect(&self, endpoint: Endpoint) -> ExpectationBuilder {
        ExpectationBuilder {
            endpoint,
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<Endpoint> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            let pending: Vec<Endpoint> = state.expectations.iter().map(|e| e.endpoint).collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                pending.len(),
                pending
            );
        }
    }

    fn answer<T>(&self, endpoint: Endpoint) -> Result<T, ApiError>
    where
        T: TryFrom<MockResponse, Error = MockResponse>,
    {
        let mut state = self.state.lock().unwrap();
        state.calls.push(endpoint);
        let expectation = state.expectations.pop_front();
        drop(state);

        match expectation {
            Some(expected) if expected.endpoint == endpoint => expected.response.map(|payload| {
                T::try_from(payload).unwrap_or_else(|other| {
                    panic!("Expectation for {endpoint} holds the wrong payload: {other:?}")
                })
            }),
            Some(expected) => panic!("Unexpected request {endpoint}, expected {}", expected.endpoint),
            None => panic!("Unexpected request {endpoint}, no expectations left"),
        }
    }
}

/// Builder for an expectation queued by [`MockCatalogService::expect`].
pub struct ExpectationBuilder {
    endpoint: Endpoint,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    pub fn return_ok(self, payload: impl Into<MockResponse>) {
        self.push(Ok(payload.into()));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<MockResponse, ApiError>) {
        self.state.lock().unwrap().expectations.push_back(Expectation {
            endpoint: self.endpoint,
            response,
        });
    }
}

#[async_trait]
impl CatalogService for MockCatalogService {
    async fn movie_keywords(&self, id: u32) -> Result<KeywordListResponse, ApiError> {
        self.answer(Endpoint::MovieKeywords(id))
    }

    async fn movie_videos(&self, id: u32) -> Result<VideoListResponse, ApiError> {
        self.answer(Endpoint::MovieVideos(id))
    }

    async fn movie_reviews(&self, id: u32) -> Result<ReviewListResponse, ApiError> {
        self.answer(Endpoint::MovieReviews(id))
    }

    async fn tv_keywords(&self, id: u32) -> Result<KeywordListResponse, ApiError> {
        self.answer(Endpoint::TvKeywords(id))
    }

    async fn tv_videos(&self, id: u32) -> Result<VideoListResponse, ApiError> {
        self.answer(Endpoint::TvVideos(id))
    }

    async fn tv_reviews(&self, id: u32) -> Result<ReviewListResponse, ApiError> {
        self.answer(Endpoint::TvReviews(id))
    }

    async fn discover_movies(&self, page: u32) -> Result<DiscoverMovieResponse, ApiError> {
        self.answer(Endpoint::DiscoverMovies(page))
    }

    async fn discover_tvs(&self, page: u32) -> Result<DiscoverTvResponse, ApiError> {
        self.answer(Endpoint::DiscoverTvs(page))
    }

    async fn popular_people(&self, page: u32) -> Result<PeopleResponse, ApiError> {
        self.answer(Endpoint::PopularPeople(page))
    }
}
