use crate::api::CatalogService;
use crate::framework::ResourceStream;
use crate::model::network::{KeywordListResponse, ReviewListResponse, VideoListResponse};
use crate::model::{Keyword, Review, Tv, Video};
use crate::repository::load_record_field;
use crate::store::CacheClient;
use std::sync::Arc;
use tracing::debug;

/// Keywords, videos and reviews of cached TV shows.
#[derive(Clone)]
pub struct TvRepository {
    service: Arc<dyn CatalogService>,
    tvs: CacheClient<Tv>,
}

impl TvRepository {
    pub fn new(service: Arc<dyn CatalogService>, tvs: CacheClient<Tv>) -> Self {
        debug!("TvRepository ready");
        Self { service, tvs }
    }

    pub fn load_keyword_list(&self, id: u32) -> ResourceStream<Vec<Keyword>> {
        let service = self.service.clone();
        load_record_field(
            format!("tv/{id}/keywords"),
            &self.tvs,
            id,
            |tv| tv.keywords.clone(),
            move || async move { service.tv_keywords(id).await },
            |tv, response: KeywordListResponse| tv.keywords = Some(response.keywords),
        )
    }

    pub fn load_video_list(&self, id: u32) -> ResourceStream<Vec<Video>> {
        let service = self.service.clone();
        load_record_field(
            format!("tv/{id}/videos"),
            &self.tvs,
            id,
            |tv| tv.videos.clone(),
            move || async move { service.tv_videos(id).await },
            |tv, response: VideoListResponse| tv.videos = Some(response.results),
        )
    }

    pub fn load_reviews_list(&self, id: u32) -> ResourceStream<Vec<Review>> {
        let service = self.service.clone();
        load_record_field(
            format!("tv/{id}/reviews"),
            &self.tvs,
            id,
            |tv| tv.reviews.clone(),
            move || async move { service.tv_reviews(id).await },
            |tv, response: ReviewListResponse| tv.reviews = Some(response.results),
        )
    }
}
