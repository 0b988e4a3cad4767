//! # Cache Client
//!
//! Typed async handle to a [`CacheActor`](crate::store::CacheActor).

use crate::store::entity::CacheEntity;
use crate::store::error::StoreError;
use crate::store::message::{Filter, StoreRequest};
use futures::future;
use futures::stream::{BoxStream, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_stream::wrappers::WatchStream;

/// ## CacheClient
///
/// Forwards requests over a Tokio mpsc channel and awaits the actor's reply
/// on a oneshot channel. Cheap to clone.
///
/// Besides one-shot reads and writes it opens *live* views with
/// [`observe`](Self::observe) and [`observe_where`](Self::observe_where):
/// streams that emit the current state immediately and again after every
/// write to the store. These are the cache readers repositories hand to the
/// synchronizer.
///
/// A live view holds a clone of the client, so the actor keeps running
/// until every view is dropped as well.
#[derive(Clone)]
pub struct CacheClient<E: CacheEntity> {
    sender: mpsc::Sender<StoreRequest<E>>,
    revisions: watch::Receiver<u64>,
}

impl<E: CacheEntity> CacheClient<E> {
    pub fn new(sender: mpsc::Sender<StoreRequest<E>>, revisions: watch::Receiver<u64>) -> Self {
        Self { sender, revisions }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, StoreError>>) -> StoreRequest<E>,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn get(&self, id: E::Id) -> Result<Option<E>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    /// Every record matching `filter`, in id order.
    pub async fn query(
        &self,
        filter: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<E>, StoreError> {
        let filter: Filter<E> = Arc::new(filter);
        self.request(|respond_to| StoreRequest::Query { filter, respond_to })
            .await
    }

    /// Upserts a batch and returns how many records were written.
    pub async fn insert(&self, items: Vec<E>) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::Insert { items, respond_to })
            .await
    }

    /// Mutates one record in place. Fails with [`StoreError::NotFound`] if absent.
    pub async fn update(
        &self,
        id: E::Id,
        mutate: impl FnOnce(&mut E) + Send + 'static,
    ) -> Result<E, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            mutate: Box::new(mutate),
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: E::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    /// Live view of one record. `None` while the record is absent.
    ///
    /// The stream ends when the actor stops.
    pub fn observe(&self, id: E::Id) -> BoxStream<'static, Option<E>> {
        let client = self.clone();
        WatchStream::new(self.revisions.clone())
            .then(move |_| {
                let client = client.clone();
                let id = id.clone();
                async move { client.get(id).await }
            })
            .take_while(|result| future::ready(result.is_ok()))
            .filter_map(|result| future::ready(result.ok()))
            .boxed()
    }

    /// Live view of every record matching `filter`, in id order.
    ///
    /// The stream ends when the actor stops.
    pub fn observe_where(
        &self,
        filter: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> BoxStream<'static, Vec<E>> {
        let client = self.clone();
        let filter: Filter<E> = Arc::new(filter);
        WatchStream::new(self.revisions.clone())
            .then(move |_| {
                let client = client.clone();
                let filter = filter.clone();
                async move {
                    client
                        .request(|respond_to| StoreRequest::Query { filter, respond_to })
                        .await
                }
            })
            .take_while(|result| future::ready(result.is_ok()))
            .filter_map(|result| future::ready(result.ok()))
            .boxed()
    }
}
