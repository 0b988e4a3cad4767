//! # Test Doubles for the Synchronizer
//!
//! Exercising a session needs three things: a cache that can be observed and
//! written, a fetcher whose calls can be counted, and a way to drain the
//! output without hanging when something goes wrong.
//!
//! | Helper | Replaces | Typical assertion |
//! |--------|----------|-------------------|
//! | [`MemoryCache`] | the cache store | value after persist, live observer count |
//! | [`FetchProbe`] | the remote fetcher | "fetched exactly once" / "never fetched" |
//! | [`collect_until_terminal`] | a consumer | full published sequence |
//!
//! ```rust
//! use movie_catalog::framework::{mock::{collect_until_terminal, FetchProbe, MemoryCache}};
//! use movie_catalog::framework::{ApiResponse, NetworkBoundResource, Resource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = MemoryCache::new(Some(vec!["cached".to_string()]));
//!     let probe = FetchProbe::<Vec<String>>::new();
//!
//!     let reader = cache.clone();
//!     let stream = NetworkBoundResource::new(
//!         "demo",
//!         move || reader.stream(),
//!         probe.scripted(vec![ApiResponse::Success(vec![])]),
//!         |_payload| async { Ok::<_, std::io::Error>(()) },
//!     )
//!     .as_stream();
//!
//!     let seen = collect_until_terminal(stream).await;
//!     assert_eq!(seen, vec![Resource::success(vec!["cached".to_string()])]);
//!     assert_eq!(probe.calls(), 0);
//! }
//! ```
//!
//! For repository-level tests with a real cache actor and a scripted remote
//! service, see [`crate::api::mock::MockCatalogService`].

use crate::framework::fetch::ApiResponse;
use crate::framework::resource::Resource;
use crate::framework::stream::ResourceStream;
use futures::stream::{self, BoxStream, StreamExt};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// How long [`collect_until_terminal`] waits before giving up.
pub const COLLECT_TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory, observable cache slot.
///
/// Clones share the slot. Every [`MemoryCache::stream`] yields the current
/// value immediately and then every subsequent write.
#[derive(Clone)]
pub struct MemoryCache<T> {
    slot: Arc<watch::Sender<Option<T>>>,
}

impl<T: Clone + Send + Sync + 'static> MemoryCache<T> {
    pub fn new(initial: Option<T>) -> Self {
        let (slot, _) = watch::channel(initial);
        Self {
            slot: Arc::new(slot),
        }
    }

    pub fn empty() -> Self {
        Self::new(None)
    }

    /// A live view of the slot, usable as a cache reader.
    pub fn stream(&self) -> BoxStream<'static, Option<T>> {
        WatchStream::new(self.slot.subscribe()).boxed()
    }

    pub fn set(&self, value: Option<T>) {
        self.slot.send_replace(value);
    }

    pub fn get(&self) -> Option<T> {
        self.slot.borrow().clone()
    }

    /// Number of live streams over this slot.
    pub fn observers(&self) -> usize {
        self.slot.receiver_count()
    }
}

/// Counts fetcher invocations and hands out scripted fetchers.
pub struct FetchProbe<R> {
    calls: Arc<AtomicUsize>,
    _payload: PhantomData<fn() -> R>,
}

impl<R> Clone for FetchProbe<R> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            _payload: PhantomData,
        }
    }
}

impl<R: Send + 'static> Default for FetchProbe<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Send + 'static> FetchProbe<R> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            _payload: PhantomData,
        }
    }

    /// A fetcher that records its call and yields `events` in order.
    pub fn scripted(
        &self,
        events: Vec<ApiResponse<R>>,
    ) -> impl FnOnce() -> BoxStream<'static, ApiResponse<R>> + Send + 'static {
        let probe = self.clone();
        move || {
            probe.record();
            stream::iter(events).boxed()
        }
    }

    /// Records a call made by a hand-written fetcher.
    pub fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Drains `stream` up to and including its first terminal resource.
///
/// Panics if nothing terminal arrives within [`COLLECT_TIMEOUT`].
pub async fn collect_until_terminal<T: Clone>(mut stream: ResourceStream<T>) -> Vec<Resource<T>> {
    let mut seen = Vec::new();
    let drained = tokio::time::timeout(COLLECT_TIMEOUT, async {
        while let Some(resource) = stream.next().await {
            let terminal = resource.is_terminal();
            seen.push(resource);
            if terminal {
                break;
            }
        }
    })
    .await;
    if drained.is_err() {
        panic!("No terminal resource within {:?}; saw {} values", COLLECT_TIMEOUT, seen.len());
    }
    seen
}
