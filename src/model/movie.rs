use crate::model::media::{Keyword, Review, Video};
use crate::store::CacheEntity;
use serde::{Deserialize, Serialize};

/// A movie as cached locally.
///
/// # Cache
/// Implements [`CacheEntity`] keyed by the TMDB id, so it can be kept by a
/// [`CacheActor`](crate::store::CacheActor).
///
/// `keywords`, `videos` and `reviews` are filled lazily by the
/// [`MovieRepository`](crate::repository::MovieRepository) loaders; `None`
/// means "never fetched" and makes the loader go to the network.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: u32,
    /// Discover page this movie was listed on. Local bookkeeping, not sent by TMDB.
    pub page: u32,
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f64,
    pub popularity: f64,
    pub keywords: Option<Vec<Keyword>>,
    pub videos: Option<Vec<Video>>,
    pub reviews: Option<Vec<Review>>,
}

impl Movie {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Self::default()
        }
    }
}

impl CacheEntity for Movie {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}
