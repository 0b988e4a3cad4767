//! Response bodies of the TMDB endpoints the repositories call.

use crate::model::media::{Keyword, Review, Video};
use crate::model::{Movie, Person, Tv};
use serde::{Deserialize, Serialize};

/// `/movie/{id}/keywords` and `/tv/{id}/keywords`.
///
/// TMDB names the list `keywords` for movies and `results` for TV.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeywordListResponse {
    pub id: u32,
    #[serde(alias = "results", default)]
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoListResponse {
    pub id: u32,
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewListResponse {
    pub id: u32,
    pub page: u32,
    pub results: Vec<Review>,
    pub total_pages: u32,
    pub total_results: u32,
}

/// One page of a paginated TMDB listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub total_pages: u32,
}

pub type DiscoverMovieResponse = PagedResponse<Movie>;
pub type DiscoverTvResponse = PagedResponse<Tv>;
pub type PeopleResponse = PagedResponse<Person>;

/// Error body TMDB sends with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    pub status_code: u32,
    pub status_message: String,
}
