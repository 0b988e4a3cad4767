//! In-process cache built on the actor pattern.
//!
//! One [`CacheActor`] per entity type owns the records; any number of
//! [`CacheClient`] clones talk to it over channels.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;

pub use actor::CacheActor;
pub use client::CacheClient;
pub use entity::CacheEntity;
pub use error::StoreError;
