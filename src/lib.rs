//! # Movie Catalog
//!
//! > **Cache-first loading of a TMDB catalog, built on Tokio actors.**
//!
//! Every loader in this crate follows the same recipe: observe the local
//! cache, decide whether what it holds is enough, and only otherwise fetch
//! from the network, persist the result and serve it back *from the cache*.
//! Callers observe the whole story as a stream of [`Resource`](framework::Resource)
//! values: loading, success or error, each carrying the best data known.
//!
//! ## Core Concepts
//!
//! ### One engine, many loaders
//! [`NetworkBoundResource<T, R>`](framework::NetworkBoundResource) is written
//! once. A loader is nothing but five bound parameters: a cache reader, a
//! fetch predicate, a remote fetcher, a persister and a failure hook.
//!
//! ### The cache is the source of truth
//! A fetched payload is never published directly. The persister is awaited,
//! the cache is read again and only that read is published as success. Later
//! writes to the cache keep flowing to every open stream.
//!
//! ### Concurrency Model
//! Each [`CacheActor`](store::CacheActor) runs in its own Tokio task and
//! processes requests sequentially, so cached records need no locks. Each
//! synchronizer session is one more task, raced internally with
//! `tokio::select!`. Dropping the last stream of a session aborts it.
//!
//! ### Observability
//! `tracing` everywhere with structured fields. See the
//! [`lifecycle::tracing`] module for details.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: The synchronizer state machine and its observable output.
//! - **Key items**: [`NetworkBoundResource`](framework::NetworkBoundResource),
//!   [`synchronize`](framework::synchronize), [`ResourceStream`](framework::ResourceStream).
//!
//! ### 2. The Cache ([`store`])
//! - **Role**: Generic actor-backed record store with live views.
//! - **Key items**: [`CacheActor`](store::CacheActor), [`CacheClient`](store::CacheClient).
//!
//! ### 3. The Network ([`api`])
//! - **Role**: The remote catalog behind a trait, with an HTTP client and a mock.
//! - **Key items**: [`CatalogService`](api::CatalogService), [`TmdbClient`](api::TmdbClient).
//!
//! ### 4. The Loaders ([`repository`])
//! - **Role**: Binds the engine to one entity and one endpoint per operation.
//! - **Key items**: [`MovieRepository`](repository::MovieRepository),
//!   [`DiscoverRepository`](repository::DiscoverRepository).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - **Role**: Spins up the cache actors and wires the repositories.
//! - **Key items**: [`CatalogSystem`](lifecycle::CatalogSystem).
//!
//! ## Quick Start
//!
//! ```bash
//! # Run with info logs
//! TMDB_API_KEY=... RUST_LOG=info cargo run
//!
//! # Tests
//! cargo test
//! ```

pub mod api;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod repository;
pub mod store;
