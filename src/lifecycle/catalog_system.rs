use crate::api::CatalogService;
use crate::model::{Movie, Person, Tv};
use crate::repository::{DiscoverRepository, MovieRepository, PeopleRepository, TvRepository};
use crate::store::{CacheActor, CacheClient, CacheEntity};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors raised while stopping the system.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("Cache task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Runtime orchestrator for the catalog.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: starting one cache actor per entity type and
///   stopping them again
/// - **Dependency Wiring**: handing every repository its cache clients and
///   the shared [`CatalogService`]
///
/// # Example
///
/// ```ignore
/// let service = Arc::new(TmdbClient::from_config(&config)?);
/// let system = CatalogSystem::new(service, config.buffer_size);
///
/// let movies = system.discover.load_movies(1).wait_terminal().await;
///
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    pub movies: MovieRepository,
    pub tvs: TvRepository,
    pub discover: DiscoverRepository,
    pub people: PeopleRepository,

    /// Direct cache access, e.g. for seeding records.
    pub movie_cache: CacheClient<Movie>,
    pub tv_cache: CacheClient<Tv>,
    pub people_cache: CacheClient<Person>,

    /// Task handles for the cache actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

fn spawn_cache<E: CacheEntity>(buffer_size: usize, handles: &mut Vec<JoinHandle<()>>) -> CacheClient<E> {
    let (actor, client) = CacheActor::<E>::new(buffer_size);
    handles.push(tokio::spawn(actor.run()));
    client
}

impl CatalogSystem {
    /// Spawns the cache actors and wires the repositories.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(service: Arc<dyn CatalogService>, buffer_size: usize) -> Self {
        let mut handles = Vec::with_capacity(3);
        let movie_cache = spawn_cache::<Movie>(buffer_size, &mut handles);
        let tv_cache = spawn_cache::<Tv>(buffer_size, &mut handles);
        let people_cache = spawn_cache::<Person>(buffer_size, &mut handles);

        info!(buffer_size, "Catalog system started");
        Self {
            movies: MovieRepository::new(service.clone(), movie_cache.clone()),
            tvs: TvRepository::new(service.clone(), tv_cache.clone()),
            discover: DiscoverRepository::new(service.clone(), movie_cache.clone(), tv_cache.clone()),
            people: PeopleRepository::new(service, people_cache.clone()),
            movie_cache,
            tv_cache,
            people_cache,
            handles,
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops every cache client held by the system and waits for the cache
    /// actors to finish. An actor keeps running while any clone of its
    /// client is alive, including the live views of open resource streams,
    /// so drop those streams first.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down catalog...");

        // Closing the channels: each actor's receiver then returns None.
        let Self {
            movies,
            tvs,
            discover,
            people,
            movie_cache,
            tv_cache,
            people_cache,
            handles,
        } = self;
        drop(movies);
        drop(tvs);
        drop(discover);
        drop(people);
        drop(movie_cache);
        drop(tv_cache);
        drop(people_cache);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(reason = %e, "Cache task failed");
                return Err(e.into());
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}
