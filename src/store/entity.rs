//! # CacheEntity Trait
//!
//! The `CacheEntity` trait is the contract a record type must satisfy to be
//! kept by the generic [`CacheActor`](crate::store::CacheActor). The store only
//! needs to know how to identify a record; everything else about its schema
//! belongs to the entity.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A record kept by a cache actor.
///
/// # Ordering
/// `Id` is `Ord` so query results come back in id order, which keeps list
/// resources stable between reads.
pub trait CacheEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier (e.g. a TMDB id).
    type Id: Ord + Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    fn id(&self) -> Self::Id;
}
