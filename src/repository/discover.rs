use crate::api::CatalogService;
use crate::framework::ResourceStream;
use crate::model::network::{DiscoverMovieResponse, DiscoverTvResponse};
use crate::model::{Movie, Tv};
use crate::repository::load_page;
use crate::store::CacheClient;
use std::sync::Arc;
use tracing::debug;

/// Discover listings, cached page by page.
#[derive(Clone)]
pub struct DiscoverRepository {
    service: Arc<dyn CatalogService>,
    movies: CacheClient<Movie>,
    tvs: CacheClient<Tv>,
}

impl DiscoverRepository {
    pub fn new(
        service: Arc<dyn CatalogService>,
        movies: CacheClient<Movie>,
        tvs: CacheClient<Tv>,
    ) -> Self {
        debug!("DiscoverRepository ready");
        Self {
            service,
            movies,
            tvs,
        }
    }

    pub fn load_movies(&self, page: u32) -> ResourceStream<Vec<Movie>> {
        let service = self.service.clone();
        load_page(
            format!("discover/movie/{page}"),
            &self.movies,
            page,
            |movie| movie.page,
            move || async move { service.discover_movies(page).await },
            |response: DiscoverMovieResponse| response.results,
            |movie, page| movie.page = page,
        )
    }

    pub fn load_tvs(&self, page: u32) -> ResourceStream<Vec<Tv>> {
        let service = self.service.clone();
        load_page(
            format!("discover/tv/{page}"),
            &self.tvs,
            page,
            |tv| tv.page,
            move || async move { service.discover_tvs(page).await },
            |response: DiscoverTvResponse| response.results,
            |tv, page| tv.page = page,
        )
    }
}
