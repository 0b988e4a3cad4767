//! # Resource Synchronizer
//!
//! The generic engine behind every repository loader. One session reads the
//! cache, decides whether the cached value is good enough, fetches and
//! persists when it is not, and publishes the whole story as a stream of
//! [`Resource`] values.
//!
//! ## Session States
//!
//! ```text
//!  Idle ──first cache value──► predicate false ──► Terminal-Success (keep forwarding cache)
//!    │
//!    └──────────────────────► predicate true ──► Fetching
//!                                                 │  cache update  → loading(update)
//!                                                 │  progress      → loading(last cached)
//!                                                 ├─ success → persist → re-read → Terminal-Success
//!                                                 └─ failure → hook  → Terminal-Error (stream ends)
//! ```
//!
//! ## Write-Then-Read-Back
//!
//! On fetch success the persister is awaited *before* anything else happens.
//! The session then drops its old cache subscription and opens a fresh one,
//! so the first `success` it publishes is read from a cache that already
//! holds the write.
//!
//! ## Cancellation
//!
//! The session runs in its own Tokio task. Dropping every
//! [`ResourceStream`] of the session aborts the task; the cache subscription
//! and the fetch stream are dropped with it.
//!
//! ## Example
//!
//! ```rust
//! use movie_catalog::framework::{fetch, mock::MemoryCache, NetworkBoundResource, Resource};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = MemoryCache::<Vec<u32>>::empty();
//!     let (reader, writer) = (cache.clone(), cache.clone());
//!
//!     let mut stream = NetworkBoundResource::new(
//!         "numbers",
//!         move || reader.stream(),
//!         || fetch::from_future(async { Ok::<_, String>(vec![1, 2, 3]) }),
//!         move |payload| async move {
//!             writer.set(Some(payload));
//!             Ok::<_, std::io::Error>(())
//!         },
//!     )
//!     .as_stream();
//!
//!     assert_eq!(stream.next().await, Some(Resource::loading(None)));
//!     assert_eq!(stream.next().await, Some(Resource::success(vec![1, 2, 3])));
//! }
//! ```

use crate::framework::error::{BoxError, SyncError};
use crate::framework::fetch::{ApiResponse, FetchStream};
use crate::framework::resource::Resource;
use crate::framework::stream::{Publisher, ResourceStream, SessionGuard};
use futures::future::BoxFuture;
use futures::stream::{BoxStream, StreamExt};
use futures::{Future, FutureExt, Stream};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

type CacheReaderFn<T> = Box<dyn Fn() -> BoxStream<'static, Option<T>> + Send + Sync>;
type FetchPredicateFn<T> = Box<dyn FnOnce(Option<&T>) -> bool + Send>;
type RemoteFetcherFn<R> = Box<dyn FnOnce() -> FetchStream<R> + Send>;
type PersisterFn<R> = Box<dyn FnOnce(R) -> BoxFuture<'static, Result<(), BoxError>> + Send>;
type FailureHookFn = Box<dyn FnOnce(&str) + Send>;

/// Default fetch predicate: refetch only when the cache holds nothing.
pub fn is_absent<T>(cached: Option<&T>) -> bool {
    cached.is_none()
}

/// Predicate for list-valued caches: refetch when absent or empty.
pub fn is_absent_or_empty<V>(cached: Option<&Vec<V>>) -> bool {
    cached.map_or(true, Vec::is_empty)
}

/// Builder for one synchronizer session.
///
/// `T` is the cached value type, `R` the remote payload type. The cache reader,
/// fetcher and persister are required; the predicate defaults to [`is_absent`]
/// and the failure hook to a log line.
pub struct NetworkBoundResource<T, R> {
    name: String,
    load_from_cache: CacheReaderFn<T>,
    should_fetch: FetchPredicateFn<T>,
    fetch: RemoteFetcherFn<R>,
    save: PersisterFn<R>,
    on_fetch_failed: FailureHookFn,
}

impl<T, R> NetworkBoundResource<T, R>
where
    T: Clone + PartialEq + Send + 'static,
    R: Send + 'static,
{
    /// # Arguments
    ///
    /// * `name` - Label for the session span (e.g. `movie/123/keywords`).
    /// * `load_from_cache` - Opens a live view of the cache. Called once at
    ///   activation and once more after a successful persist.
    /// * `fetch` - Starts the remote call.
    /// * `save` - Writes the fetched payload into the cache.
    pub fn new<C, CS, F, FS, S, SF, E>(
        name: impl Into<String>,
        load_from_cache: C,
        fetch: F,
        save: S,
    ) -> Self
    where
        C: Fn() -> CS + Send + Sync + 'static,
        CS: Stream<Item = Option<T>> + Send + 'static,
        F: FnOnce() -> FS + Send + 'static,
        FS: Stream<Item = ApiResponse<R>> + Send + 'static,
        S: FnOnce(R) -> SF + Send + 'static,
        SF: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        let name = name.into();
        let hook_name = name.clone();
        Self {
            name,
            load_from_cache: Box::new(move || load_from_cache().boxed()),
            should_fetch: Box::new(is_absent),
            fetch: Box::new(move || fetch().boxed()),
            save: Box::new(move |payload| {
                save(payload)
                    .map(|result: Result<(), E>| result.map_err(Into::<BoxError>::into))
                    .boxed()
            }),
            on_fetch_failed: Box::new(move |message| {
                debug!(resource = %hook_name, reason = message, "Fetch failure reported");
            }),
        }
    }

    /// Decides from the first cached value whether a fetch is needed.
    ///
    /// When it declines on an absent value the session publishes nothing
    /// until the cache yields a present one, which is then a success.
    pub fn should_fetch(mut self, predicate: impl FnOnce(Option<&T>) -> bool + Send + 'static) -> Self {
        self.should_fetch = Box::new(predicate);
        self
    }

    /// Side channel called with the message of a failed fetch.
    pub fn on_fetch_failed(mut self, hook: impl FnOnce(&str) + Send + 'static) -> Self {
        self.on_fetch_failed = Box::new(hook);
        self
    }

    /// Spawns the session and returns its stream.
    ///
    /// Must be called from within a Tokio runtime. The returned stream is
    /// subscribed before the session starts, so it sees every value.
    pub fn as_stream(self) -> ResourceStream<T> {
        let publisher = Publisher::new();
        let span = info_span!("sync", resource = %self.name);
        let (ready_tx, ready_rx) = tokio::sync::oneshot::channel::<Publisher<T>>();
        let task = tokio::spawn(
            async move {
                if let Ok(publisher) = ready_rx.await {
                    self.run(publisher).await;
                }
            }
            .instrument(span),
        );
        let stream = publisher.stream(Arc::new(SessionGuard::new(task)));
        let _ = ready_tx.send(publisher);
        stream
    }

    async fn run(self, publisher: Publisher<T>) {
        let Self {
            name: _,
            load_from_cache,
            should_fetch,
            fetch,
            save,
            on_fetch_failed,
        } = self;

        // Idle: wait for the first cache value.
        let mut cache = load_from_cache();
        let Some(first) = cache.next().await else {
            warn!("Cache closed before first value");
            publisher.publish(Resource::error(SyncError::CacheClosed, None));
            return;
        };

        if !should_fetch(first.as_ref()) {
            debug!(cached = first.is_some(), "Cache sufficient, skipping fetch");
            if let Some(data) = first {
                publisher.publish(Resource::success(data));
            }
            forward_success(cache, &publisher).await;
            return;
        }

        // Fetching: cache updates and remote progress race into one stream.
        debug!(cached = first.is_some(), "Fetching");
        publisher.publish(Resource::loading(first.clone()));
        let mut last_known = first;
        let mut remote = fetch();
        let mut cache_open = true;
        let outcome = loop {
            tokio::select! {
                update = cache.next(), if cache_open => match update {
                    Some(data) => {
                        last_known = data.clone();
                        publisher.publish(Resource::loading(data));
                    }
                    None => cache_open = false,
                },
                event = remote.next() => match event {
                    Some(ApiResponse::Loading) => {
                        publisher.publish(Resource::loading(last_known.clone()));
                    }
                    Some(ApiResponse::Success(payload)) => break Ok(payload),
                    Some(ApiResponse::Failure(message)) => break Err(message),
                    None => break Err("Remote closed without a response".to_string()),
                },
            }
        };
        drop(remote);
        drop(cache);

        match outcome {
            Ok(payload) => {
                if let Err(e) = save(payload).await {
                    let error = SyncError::Persist(e.to_string());
                    error!(%error, "Persist failed");
                    publisher.publish(Resource::error(error, last_known));
                    return;
                }
                info!("Fetched and persisted");
                forward_success(load_from_cache(), &publisher).await;
            }
            Err(message) => {
                warn!(reason = %message, "Fetch failed");
                on_fetch_failed(&message);
                publisher.publish(Resource::error(SyncError::Fetch(message), last_known));
            }
        }
    }
}

/// Terminal success: every present cache value is published as success until
/// the cache closes or nobody is listening.
async fn forward_success<T: Clone + PartialEq>(
    mut cache: BoxStream<'static, Option<T>>,
    publisher: &Publisher<T>,
) {
    while let Some(update) = cache.next().await {
        if let Some(data) = update {
            if !publisher.publish(Resource::success(data)) {
                debug!("No subscribers left");
                return;
            }
        }
    }
    debug!("Cache closed");
}

/// Runs one session from its five parameters.
///
/// Equivalent to building a [`NetworkBoundResource`] with an explicit
/// predicate and failure hook. A predicate that skips the fetch on an absent
/// value leaves the stream silent until the cache holds one.
pub fn synchronize<T, R, C, CS, P, F, FS, S, SF, E, H>(
    load_from_cache: C,
    should_fetch: P,
    fetch: F,
    save: S,
    on_fetch_failed: H,
) -> ResourceStream<T>
where
    T: Clone + PartialEq + Send + 'static,
    R: Send + 'static,
    C: Fn() -> CS + Send + Sync + 'static,
    CS: Stream<Item = Option<T>> + Send + 'static,
    P: FnOnce(Option<&T>) -> bool + Send + 'static,
    F: FnOnce() -> FS + Send + 'static,
    FS: Stream<Item = ApiResponse<R>> + Send + 'static,
    S: FnOnce(R) -> SF + Send + 'static,
    SF: Future<Output = Result<(), E>> + Send + 'static,
    E: Into<BoxError> + 'static,
    H: FnOnce(&str) + Send + 'static,
{
    NetworkBoundResource::new("synchronize", load_from_cache, fetch, save)
        .should_fetch(should_fetch)
        .on_fetch_failed(on_fetch_failed)
        .as_stream()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{collect_until_terminal, FetchProbe, MemoryCache};
    use futures::stream;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Persister writing into a `MemoryCache`, counting its calls.
    fn recording_saver(
        cache: &MemoryCache<Vec<u32>>,
        calls: &Arc<AtomicUsize>,
    ) -> impl FnOnce(Vec<u32>) -> BoxFuture<'static, Result<(), std::io::Error>> + Send + 'static {
        let cache = cache.clone();
        let calls = calls.clone();
        move |payload| {
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                cache.set(Some(payload));
                Ok(())
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn test_sufficient_cache_never_fetches() {
        let cache = MemoryCache::new(Some(vec![1, 2]));
        let probe = FetchProbe::<Vec<u32>>::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let stream = NetworkBoundResource::new(
            "cached",
            move || reader.stream(),
            probe.scripted(vec![ApiResponse::Success(vec![9])]),
            recording_saver(&cache, &saves),
        )
        .should_fetch(is_absent_or_empty)
        .as_stream();

        let seen = collect_until_terminal(stream).await;
        assert_eq!(seen, vec![Resource::success(vec![1, 2])]);
        assert_eq!(probe.calls(), 0);
        assert_eq!(saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_success_persists_before_success() {
        let cache = MemoryCache::<Vec<u32>>::empty();
        let probe = FetchProbe::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let mut stream = NetworkBoundResource::new(
            "fetched",
            move || reader.stream(),
            probe.scripted(vec![ApiResponse::Success(vec![1, 2])]),
            recording_saver(&cache, &saves),
        )
        .as_stream();

        assert_eq!(stream.next().await, Some(Resource::loading(None)));
        let terminal = stream.next().await;
        // The persister ran before the success was observable.
        assert_eq!(saves.load(Ordering::SeqCst), 1);
        assert_eq!(terminal, Some(Resource::success(vec![1, 2])));
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_calls_hook_once() {
        let cache = MemoryCache::<Vec<u32>>::empty();
        let probe = FetchProbe::new();
        let saves = Arc::new(AtomicUsize::new(0));
        let failures = Arc::new(Mutex::new(Vec::new()));

        let reader = cache.clone();
        let hook_failures = failures.clone();
        let stream = NetworkBoundResource::new(
            "failing",
            move || reader.stream(),
            probe.scripted(vec![ApiResponse::Failure("network unreachable".to_string())]),
            recording_saver(&cache, &saves),
        )
        .on_fetch_failed(move |message| hook_failures.lock().unwrap().push(message.to_string()))
        .as_stream();

        let seen: Vec<_> = stream.collect().await;
        assert_eq!(
            seen,
            vec![
                Resource::loading(None),
                Resource::error("network unreachable", None)
            ]
        );
        assert_eq!(*failures.lock().unwrap(), vec!["network unreachable".to_string()]);
        assert_eq!(saves.load(Ordering::SeqCst), 0);
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test]
    async fn test_error_carries_last_cached_value() {
        let cache = MemoryCache::new(Some(Vec::<u32>::new()));
        let probe = FetchProbe::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let stream = NetworkBoundResource::new(
            "stale",
            move || reader.stream(),
            probe.scripted(vec![ApiResponse::Failure("HTTP 500".to_string())]),
            recording_saver(&cache, &saves),
        )
        .should_fetch(is_absent_or_empty)
        .as_stream();

        let seen: Vec<_> = stream.collect().await;
        assert_eq!(
            seen.last(),
            Some(&Resource::error("HTTP 500", Some(Vec::new())))
        );
    }

    #[tokio::test]
    async fn test_persist_failure_is_distinct_error() {
        let cache = MemoryCache::<Vec<u32>>::empty();
        let probe = FetchProbe::new();
        let hook_calls = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let hook = hook_calls.clone();
        let stream = NetworkBoundResource::new(
            "unwritable",
            move || reader.stream(),
            probe.scripted(vec![ApiResponse::Success(vec![1])]),
            |_payload: Vec<u32>| async { Err::<(), _>(std::io::Error::other("disk full")) },
        )
        .on_fetch_failed(move |_| {
            hook.fetch_add(1, Ordering::SeqCst);
        })
        .as_stream();

        let seen: Vec<_> = stream.collect().await;
        let terminal = seen.last().cloned().unwrap();
        let error = terminal.error_kind().cloned().unwrap();
        assert!(error.is_persist());
        assert_eq!(error, SyncError::Persist("disk full".to_string()));
        assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_progress_republishes_last_cached_value() {
        let cache = MemoryCache::<Vec<u32>>::empty();
        let probe = FetchProbe::<Vec<u32>>::new();
        let saves = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        let reader = cache.clone();
        let fetch_calls = probe.clone();
        let mut stream = NetworkBoundResource::new(
            "progress",
            move || reader.stream(),
            move || {
                fetch_calls.record();
                tokio_stream::wrappers::UnboundedReceiverStream::new(rx)
            },
            recording_saver(&cache, &saves),
        )
        .as_stream();

        assert_eq!(stream.next().await, Some(Resource::loading(None)));

        // A cache write from elsewhere while the fetch is in flight.
        cache.set(Some(vec![5]));
        assert_eq!(stream.next().await, Some(Resource::loading(Some(vec![5]))));

        tx.send(ApiResponse::Loading).unwrap();
        tx.send(ApiResponse::Success(vec![5, 6])).unwrap();
        assert_eq!(stream.next().await, Some(Resource::success(vec![5, 6])));
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test]
    async fn test_success_keeps_forwarding_cache_updates() {
        let cache = MemoryCache::new(Some(vec![1]));
        let probe = FetchProbe::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let mut stream = NetworkBoundResource::new(
            "forwarding",
            move || reader.stream(),
            probe.scripted(vec![]),
            recording_saver(&cache, &saves),
        )
        .as_stream();

        assert_eq!(stream.next().await, Some(Resource::success(vec![1])));
        cache.set(Some(vec![1, 2]));
        assert_eq!(stream.next().await, Some(Resource::success(vec![1, 2])));
        assert_eq!(probe.calls(), 0);
    }

    #[tokio::test]
    async fn test_error_session_stops_forwarding() {
        let cache = MemoryCache::<Vec<u32>>::empty();
        let probe = FetchProbe::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let mut stream = NetworkBoundResource::new(
            "final",
            move || reader.stream(),
            probe.scripted(vec![ApiResponse::Failure("offline".to_string())]),
            recording_saver(&cache, &saves),
        )
        .as_stream();

        assert_eq!(
            stream.wait_terminal().await,
            Some(Resource::error("offline", None))
        );
        cache.set(Some(vec![3]));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_resubscribe_after_success_does_not_refetch() {
        let cache = MemoryCache::<Vec<u32>>::empty();
        let probe = FetchProbe::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let mut stream = NetworkBoundResource::new(
            "replayed",
            move || reader.stream(),
            probe.scripted(vec![ApiResponse::Success(vec![4])]),
            recording_saver(&cache, &saves),
        )
        .as_stream();

        assert_eq!(stream.wait_terminal().await, Some(Resource::success(vec![4])));
        let mut again = stream.resubscribe();
        assert_eq!(again.next().await, Some(Resource::success(vec![4])));
        assert_eq!(probe.calls(), 1);
        assert_eq!(saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_remote_closing_without_outcome_is_fetch_error() {
        let cache = MemoryCache::<Vec<u32>>::empty();
        let probe = FetchProbe::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let stream = NetworkBoundResource::new(
            "silent",
            move || reader.stream(),
            probe.scripted(vec![ApiResponse::Loading]),
            recording_saver(&cache, &saves),
        )
        .as_stream();

        let seen = collect_until_terminal(stream).await;
        assert!(seen.last().unwrap().error_kind().unwrap().is_fetch());
    }

    #[tokio::test]
    async fn test_cache_closed_before_first_value() {
        let stream = NetworkBoundResource::new(
            "closed",
            || stream::empty::<Option<u32>>(),
            || stream::empty::<ApiResponse<u32>>(),
            |_payload: u32| async { Ok::<_, std::io::Error>(()) },
        )
        .as_stream();

        let seen: Vec<_> = stream.collect().await;
        assert_eq!(seen, vec![Resource::error(SyncError::CacheClosed, None)]);
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_dropping_stream_releases_fetch_and_cache() {
        let cache = MemoryCache::<Vec<u32>>::empty();
        let fetch_released = Arc::new(AtomicBool::new(false));
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let flag = DropFlag(fetch_released.clone());
        let mut stream = NetworkBoundResource::new(
            "cancelled",
            move || reader.stream(),
            move || {
                stream::pending::<ApiResponse<Vec<u32>>>().map(move |event| {
                    let _held = &flag;
                    event
                })
            },
            recording_saver(&cache, &saves),
        )
        .as_stream();

        assert_eq!(stream.next().await, Some(Resource::loading(None)));
        assert_eq!(cache.observers(), 1);
        drop(stream);

        tokio::time::timeout(Duration::from_secs(1), async {
            while !fetch_released.load(Ordering::SeqCst) || cache.observers() > 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("session was not released");
        assert_eq!(saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_declined_fetch_on_empty_cache_waits_for_a_value() {
        let cache = MemoryCache::<Vec<u32>>::empty();
        let probe = FetchProbe::<Vec<u32>>::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let mut stream = synchronize(
            move || reader.stream(),
            |_cached: Option<&Vec<u32>>| false,
            probe.scripted(vec![ApiResponse::Success(vec![9])]),
            recording_saver(&cache, &saves),
            |_message: &str| {},
        );

        let quiet = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
        assert!(quiet.is_err(), "Nothing should be published for an absent value");
        assert_eq!(stream.latest(), None);

        cache.set(Some(vec![4]));
        assert_eq!(stream.wait_terminal().await, Some(Resource::success(vec![4])));
        assert_eq!(probe.calls(), 0);
        assert_eq!(saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_synchronize_uses_explicit_predicate() {
        let cache = MemoryCache::new(Some(vec![1]));
        let probe = FetchProbe::new();
        let saves = Arc::new(AtomicUsize::new(0));

        let reader = cache.clone();
        let stream = synchronize(
            move || reader.stream(),
            |_cached: Option<&Vec<u32>>| true,
            probe.scripted(vec![ApiResponse::Success(vec![1, 2, 3])]),
            recording_saver(&cache, &saves),
            |_message: &str| {},
        );

        let seen = collect_until_terminal(stream).await;
        assert_eq!(
            seen,
            vec![
                Resource::loading(Some(vec![1])),
                Resource::success(vec![1, 2, 3])
            ]
        );
        assert_eq!(probe.calls(), 1);
    }
}
