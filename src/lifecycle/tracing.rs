//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter that
//! hides module paths (`with_target(false)`). Log lines carry structured
//! fields instead: `entity_type` for cache actors and a `sync` span with the
//! `resource` name around every synchronizer session.
//!
//! ```bash
//! # Lifecycle only
//! RUST_LOG=info cargo run
//!
//! # Per-request cache and fetch detail
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a first load of a discover page reads like:
//!
//! ```text
//! INFO Cache started entity_type="Movie"
//! DEBUG sync: Fetching cached=true resource=discover/movie/1
//! DEBUG sync: GET endpoint=/discover/movie?page=1 resource=discover/movie/1
//! INFO Inserted entity_type="Movie" count=20 size=20
//! INFO sync: Fetched and persisted resource=discover/movie/1
//! ```
//!
//! `RUST_LOG` wins when set. Otherwise the filter passed in is used, which
//! the binary takes from the `[logging]` config section.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
