use crate::api::CatalogService;
use crate::framework::ResourceStream;
use crate::model::network::{KeywordListResponse, ReviewListResponse, VideoListResponse};
use crate::model::{Keyword, Movie, Review, Video};
use crate::repository::load_record_field;
use crate::store::CacheClient;
use std::sync::Arc;
use tracing::debug;

/// Keywords, videos and reviews of cached movies.
#[derive(Clone)]
pub struct MovieRepository {
    service: Arc<dyn CatalogService>,
    movies: CacheClient<Movie>,
}

impl MovieRepository {
    pub fn new(service: Arc<dyn CatalogService>, movies: CacheClient<Movie>) -> Self {
        debug!("MovieRepository ready");
        Self { service, movies }
    }

    pub fn load_keyword_list(&self, id: u32) -> ResourceStream<Vec<Keyword>> {
        let service = self.service.clone();
        load_record_field(
            format!("movie/{id}/keywords"),
            &self.movies,
            id,
            |movie| movie.keywords.clone(),
            move || async move { service.movie_keywords(id).await },
            |movie, response: KeywordListResponse| movie.keywords = Some(response.keywords),
        )
    }

    pub fn load_video_list(&self, id: u32) -> ResourceStream<Vec<Video>> {
        let service = self.service.clone();
        load_record_field(
            format!("movie/{id}/videos"),
            &self.movies,
            id,
            |movie| movie.videos.clone(),
            move || async move { service.movie_videos(id).await },
            |movie, response: VideoListResponse| movie.videos = Some(response.results),
        )
    }

    pub fn load_reviews_list(&self, id: u32) -> ResourceStream<Vec<Review>> {
        let service = self.service.clone();
        load_record_field(
            format!("movie/{id}/reviews"),
            &self.movies,
            id,
            |movie| movie.reviews.clone(),
            move || async move { service.movie_reviews(id).await },
            |movie, response: ReviewListResponse| movie.reviews = Some(response.results),
        )
    }
}
