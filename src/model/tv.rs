use crate::model::media::{Keyword, Review, Video};
use crate::store::CacheEntity;
use serde::{Deserialize, Serialize};

/// A TV show as cached locally. Mirrors [`Movie`](crate::model::Movie).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tv {
    pub id: u32,
    pub page: u32,
    pub name: String,
    pub overview: String,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f64,
    pub popularity: f64,
    pub keywords: Option<Vec<Keyword>>,
    pub videos: Option<Vec<Video>>,
    pub reviews: Option<Vec<Review>>,
}

impl Tv {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }
}

impl CacheEntity for Tv {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}
