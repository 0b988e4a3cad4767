//! Repository facades.
//!
//! Each loader binds one [`NetworkBoundResource`] session to a cache actor
//! and a [`CatalogService`](crate::api::CatalogService) endpoint. All of
//! them refetch when the cached list is absent or empty.
//!
//! Loaders spawn their session, so they must be called from within a Tokio
//! runtime.

pub mod discover;
pub mod movie;
pub mod people;
pub mod tv;

pub use discover::DiscoverRepository;
pub use movie::MovieRepository;
pub use people::PeopleRepository;
pub use tv::TvRepository;

use crate::api::ApiError;
use crate::framework::{fetch, is_absent_or_empty, NetworkBoundResource, ResourceStream};
use crate::store::{CacheClient, CacheEntity};
use futures::{Future, StreamExt};

/// Loads a list held in a field of one cached record.
///
/// The field is read through a live view of the record; an uncached record
/// reads as absent. The fetched payload is written back with `write`, which
/// fails with a persist error when the record is not cached.
pub(crate) fn load_record_field<E, V, R, F, Fut>(
    name: String,
    cache: &CacheClient<E>,
    id: E::Id,
    read: fn(&E) -> Option<Vec<V>>,
    request: F,
    write: fn(&mut E, R),
) -> ResourceStream<Vec<V>>
where
    E: CacheEntity,
    V: Clone + PartialEq + Send + 'static,
    R: Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<R, ApiError>> + Send + 'static,
{
    let reader = cache.clone();
    let writer = cache.clone();
    let read_id = id.clone();
    NetworkBoundResource::new(
        name,
        move || {
            reader
                .observe(read_id.clone())
                .map(move |record| record.as_ref().and_then(read))
        },
        move || fetch::from_future(request()),
        move |payload| async move {
            writer
                .update(id, move |record| write(record, payload))
                .await
                .map(|_| ())
        },
    )
    .should_fetch(is_absent_or_empty)
    .as_stream()
}

/// Loads one page of a paginated listing.
///
/// The cache read is every record stamped with `page`. The payload's records
/// are stamped and upserted.
pub(crate) fn load_page<E, R, F, Fut>(
    name: String,
    cache: &CacheClient<E>,
    page: u32,
    page_of: fn(&E) -> u32,
    request: F,
    into_records: fn(R) -> Vec<E>,
    stamp: fn(&mut E, u32),
) -> ResourceStream<Vec<E>>
where
    E: CacheEntity + PartialEq,
    R: Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<R, ApiError>> + Send + 'static,
{
    let reader = cache.clone();
    let writer = cache.clone();
    NetworkBoundResource::new(
        name,
        move || {
            reader
                .observe_where(move |record| page_of(record) == page)
                .map(Some)
        },
        move || fetch::from_future(request()),
        move |payload| async move {
            let mut records = into_records(payload);
            for record in &mut records {
                stamp(record, page);
            }
            writer.insert(records).await.map(|_| ())
        },
    )
    .should_fetch(is_absent_or_empty)
    .as_stream()
}
