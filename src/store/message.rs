//! # Store Messages
//!
//! Requests sent from a [`CacheClient`](crate::store::CacheClient) to its
//! [`CacheActor`](crate::store::CacheActor). Every request carries a oneshot
//! sender for the reply.

use crate::store::entity::CacheEntity;
use crate::store::error::StoreError;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by cache actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Row predicate for [`StoreRequest::Query`]. Shared so live queries can reuse it.
pub type Filter<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// In-place edit for [`StoreRequest::Update`].
pub type Mutation<E> = Box<dyn FnOnce(&mut E) + Send>;

/// Internal message type sent to the actor.
///
/// - **Get**: one record by id.
/// - **Query**: every record matching a filter, in id order.
/// - **Insert**: upsert a batch; an existing record with the same id is replaced.
/// - **Update**: mutate one existing record in place.
/// - **Delete**: remove one record.
///
/// Insert, Update and Delete are writes: they bump the store revision before
/// replying, so observers see them.
pub enum StoreRequest<E: CacheEntity> {
    Get {
        id: E::Id,
        respond_to: Response<Option<E>>,
    },
    Query {
        filter: Filter<E>,
        respond_to: Response<Vec<E>>,
    },
    Insert {
        items: Vec<E>,
        respond_to: Response<usize>,
    },
    Update {
        id: E::Id,
        mutate: Mutation<E>,
        respond_to: Response<E>,
    },
    Delete {
        id: E::Id,
        respond_to: Response<()>,
    },
}
