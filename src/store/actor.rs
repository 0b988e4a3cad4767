//! # Cache Actor
//!
//! The `CacheActor` owns the records of one entity type and processes all
//! requests sequentially in its own Tokio task, so the map needs no lock.
//!
//! ## Revisions
//!
//! The actor publishes a revision counter on a `watch` channel. Every write
//! bumps the revision **before** the reply is sent, so by the time a caller's
//! `insert`/`update` returns, any reader opened afterwards (and every live
//! observer) sees the new state. The synchronizer's write-then-read-back
//! ordering relies on this.

use crate::store::client::CacheClient;
use crate::store::entity::CacheEntity;
use crate::store::error::StoreError;
use crate::store::message::StoreRequest;
use std::collections::BTreeMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that keeps a collection of cached records.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `CacheActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Clone the client wherever records are read or written.
///
/// ```rust
/// use movie_catalog::store::{CacheActor, CacheEntity};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Genre { id: u32, name: String }
///
/// impl CacheEntity for Genre {
///     type Id = u32;
///     fn id(&self) -> u32 { self.id }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = CacheActor::<Genre>::new(10);
///     tokio::spawn(actor.run());
///
///     client.insert(vec![Genre { id: 18, name: "Drama".into() }]).await.unwrap();
///     let genre = client.get(18).await.unwrap().unwrap();
///     assert_eq!(genre.name, "Drama");
/// }
/// ```
pub struct CacheActor<E: CacheEntity> {
    receiver: mpsc::Receiver<StoreRequest<E>>,
    store: BTreeMap<E::Id, E>,
    revision: watch::Sender<u64>,
}

impl<E: CacheEntity> CacheActor<E> {
    /// Creates a new `CacheActor` and its associated `CacheClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, CacheClient<E>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (revision, revisions) = watch::channel(0);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            revision,
        };
        let client = CacheClient::new(sender, revisions);
        (actor, client)
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Movie" instead of "movie_catalog::model::movie::Movie")
        let entity_type = std::any::type_name::<E>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Cache started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Query { filter, respond_to } => {
                    let items: Vec<E> = self
                        .store
                        .values()
                        .filter(|item| filter(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, count = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::Insert { items, respond_to } => {
                    let count = items.len();
                    for item in items {
                        self.store.insert(item.id(), item);
                    }
                    self.bump();
                    info!(entity_type, count, size = self.store.len(), "Inserted");
                    let _ = respond_to.send(Ok(count));
                }
                StoreRequest::Update {
                    id,
                    mutate,
                    respond_to,
                } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        mutate(item);
                        let updated = item.clone();
                        self.bump();
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(updated));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    if self.store.remove(&id).is_some() {
                        self.bump();
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
