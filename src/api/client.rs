//! # TMDB Client
//!
//! [`CatalogService`] over HTTP with `reqwest`.

use crate::api::error::ApiError;
use crate::api::service::{CatalogService, Endpoint};
use crate::config::ResolvedConfig;
use crate::model::network::{
    DiscoverMovieResponse, DiscoverTvResponse, KeywordListResponse, PeopleResponse,
    ReviewListResponse, StatusResponse, VideoListResponse,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends `GET {base_url}{path}?api_key=..[&page=..]` and decodes the JSON body.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, &config.api_key, config.timeout)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let mut query = vec![("api_key", self.api_key.clone())];
        if let Some(page) = endpoint.page() {
            query.push(("page", page.to_string()));
        }

        debug!(%endpoint, "GET");
        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            let message = match response.json::<StatusResponse>().await {
                Ok(body) if !body.status_message.is_empty() => body.status_message,
                _ => status.canonical_reason().unwrap_or("Unknown status").to_string(),
            };
            warn!(%endpoint, code, reason = %message, "TMDB error");
            return Err(ApiError::Status { code, message });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogService for TmdbClient {
    async fn movie_keywords(&self, id: u32) -> Result<KeywordListResponse, ApiError> {
        self.get(Endpoint::MovieKeywords(id)).await
    }

    async fn movie_videos(&self, id: u32) -> Result<VideoListResponse, ApiError> {
        self.get(Endpoint::MovieVideos(id)).await
    }

    async fn movie_reviews(&self, id: u32) -> Result<ReviewListResponse, ApiError> {
        self.get(Endpoint::MovieReviews(id)).await
    }

    async fn tv_keywords(&self, id: u32) -> Result<KeywordListResponse, ApiError> {
        self.get(Endpoint::TvKeywords(id)).await
    }

    async fn tv_videos(&self, id: u32) -> Result<VideoListResponse, ApiError> {
        self.get(Endpoint::TvVideos(id)).await
    }

    async fn tv_reviews(&self, id: u32) -> Result<ReviewListResponse, ApiError> {
        self.get(Endpoint::TvReviews(id)).await
    }

    async fn discover_movies(&self, page: u32) -> Result<DiscoverMovieResponse, ApiError> {
        self.get(Endpoint::DiscoverMovies(page)).await
    }

    async fn discover_tvs(&self, page: u32) -> Result<DiscoverTvResponse, ApiError> {
        self.get(Endpoint::DiscoverTvs(page)).await
    }

    async fn popular_people(&self, page: u32) -> Result<PeopleResponse, ApiError> {
        self.get(Endpoint::PopularPeople(page)).await
    }
}
