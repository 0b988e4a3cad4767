//! # movie-catalog
//!
//! Loads one discover page of movies, TV shows and popular people through
//! the cache and prints a summary.
//!
//! ```bash
//! TMDB_API_KEY=... RUST_LOG=info cargo run -- --page 2
//! ```

use clap::Parser;
use movie_catalog::api::TmdbClient;
use movie_catalog::config::{load_config, resolve};
use movie_catalog::framework::Resource;
use movie_catalog::lifecycle::tracing::setup_tracing;
use movie_catalog::lifecycle::CatalogSystem;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "movie-catalog", about = "Cache-first TMDB catalog loader")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "movie-catalog.toml")]
    config: PathBuf,

    /// Discover page to load
    #[arg(short, long, default_value_t = 1)]
    page: u32,
}

fn summarize<T>(what: &str, page: u32, resource: Option<Resource<Vec<T>>>) {
    match resource {
        Some(Resource::Success { data }) => info!(what, page, count = data.len(), "Loaded"),
        Some(Resource::Error { error, data }) => warn!(
            what,
            page,
            reason = %error,
            cached = data.map_or(0, |d| d.len()),
            "Load failed"
        ),
        Some(Resource::Loading { .. }) | None => warn!(what, page, "Session ended without a result"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let config = resolve(&load_config(&args.config)?);
    setup_tracing(&config.log_filter);
    info!(base_url = %config.base_url, page = args.page, "Starting movie catalog");

    let service = Arc::new(TmdbClient::from_config(&config)?);
    let system = CatalogSystem::new(service, config.buffer_size);

    {
        // Streams hold cache clients; they must be gone before shutdown.
        let mut movie_stream = system.discover.load_movies(args.page);
        let mut tv_stream = system.discover.load_tvs(args.page);
        let mut people_stream = system.people.load_people(args.page);

        let (movies, tvs, people) = tokio::join!(
            movie_stream.wait_terminal(),
            tv_stream.wait_terminal(),
            people_stream.wait_terminal()
        );
        summarize("movies", args.page, movies);
        summarize("tvs", args.page, tvs);
        summarize("people", args.page, people);
    }

    system.shutdown().await?;
    Ok(())
}
