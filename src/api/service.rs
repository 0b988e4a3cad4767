//! # Catalog Service
//!
//! The remote side of every repository: one async method per TMDB endpoint.

use crate::api::error::ApiError;
use crate::model::network::{
    DiscoverMovieResponse, DiscoverTvResponse, KeywordListResponse, PeopleResponse,
    ReviewListResponse, VideoListResponse,
};
use async_trait::async_trait;
use std::fmt;

/// A TMDB request, identified by what it asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    MovieKeywords(u32),
    MovieVideos(u32),
    MovieReviews(u32),
    TvKeywords(u32),
    TvVideos(u32),
    TvReviews(u32),
    DiscoverMovies(u32),
    DiscoverTvs(u32),
    PopularPeople(u32),
}

impl Endpoint {
    /// Path below the API base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::MovieKeywords(id) => format!("/movie/{id}/keywords"),
            Endpoint::MovieVideos(id) => format!("/movie/{id}/videos"),
            Endpoint::MovieReviews(id) => format!("/movie/{id}/reviews"),
            Endpoint::TvKeywords(id) => format!("/tv/{id}/keywords"),
            Endpoint::TvVideos(id) => format!("/tv/{id}/videos"),
            Endpoint::TvReviews(id) => format!("/tv/{id}/reviews"),
            Endpoint::DiscoverMovies(_) => "/discover/movie".to_string(),
            Endpoint::DiscoverTvs(_) => "/discover/tv".to_string(),
            Endpoint::PopularPeople(_) => "/person/popular".to_string(),
        }
    }

    /// The `page` query parameter, for paginated listings.
    pub fn page(&self) -> Option<u32> {
        match self {
            Endpoint::DiscoverMovies(page)
            | Endpoint::DiscoverTvs(page)
            | Endpoint::PopularPeople(page) => Some(*page),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page() {
            Some(page) => write!(f, "{}?page={page}", self.path()),
            None => f.write_str(&self.path()),
        }
    }
}

/// Remote catalog used by the repositories.
///
/// Implemented over HTTP by [`TmdbClient`](crate::api::TmdbClient) and by
/// [`MockCatalogService`](crate::api::mock::MockCatalogService) in tests.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn movie_keywords(&self, id: u32) -> Result<KeywordListResponse, ApiError>;
    async fn movie_videos(&self, id: u32) -> Result<VideoListResponse, ApiError>;
    async fn movie_reviews(&self, id: u32) -> Result<ReviewListResponse, ApiError>;

    async fn tv_keywords(&self, id: u32) -> Result<KeywordListResponse, ApiError>;
    async fn tv_videos(&self, id: u32) -> Result<VideoListResponse, ApiError>;
    async fn tv_reviews(&self, id: u32) -> Result<ReviewListResponse, ApiError>;

    async fn discover_movies(&self, page: u32) -> Result<DiscoverMovieResponse, ApiError>;
    async fn discover_tvs(&self, page: u32) -> Result<DiscoverTvResponse, ApiError>;
    async fn popular_people(&self, page: u32) -> Result<PeopleResponse, ApiError>;
}
