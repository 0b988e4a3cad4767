//! # Resource Streams
//!
//! The output side of a synchronizer session.
//!
//! A session task owns a [`Publisher`]; consumers hold [`ResourceStream`]s.
//! Every stream of a session shares one [`SessionGuard`]: when the last stream
//! is dropped the session task is aborted, which drops its cache subscription
//! and any in-flight fetch.
//!
//! The publisher remembers the latest value. [`ResourceStream::resubscribe`]
//! replays it before anything new, so an observer that attaches after the
//! session went terminal still sees the current state.

use crate::framework::resource::Resource;
use futures::Stream;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

struct Shared<T> {
    latest: Option<Resource<T>>,
    subscribers: Vec<mpsc::UnboundedSender<Resource<T>>>,
    closed: bool,
}

fn lock<T>(shared: &Mutex<Shared<T>>) -> MutexGuard<'_, Shared<T>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn subscribe<T: Clone>(shared: &Mutex<Shared<T>>) -> mpsc::UnboundedReceiver<Resource<T>> {
    let (sender, receiver) = mpsc::unbounded_channel();
    let mut state = lock(shared);
    if let Some(latest) = &state.latest {
        let _ = sender.send(latest.clone());
    }
    // A closed session keeps no senders, so the new stream ends after the replay.
    if !state.closed {
        state.subscribers.push(sender);
    }
    receiver
}

/// Writer half, owned by the session task. Dropping it ends every stream.
pub(crate) struct Publisher<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T: Clone + PartialEq> Publisher<T> {
    pub(crate) fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                latest: None,
                subscribers: Vec::new(),
                closed: false,
            })),
        }
    }

    /// Sends `resource` to every live subscriber unless it equals the latest value.
    ///
    /// Returns `false` once nobody is listening.
    pub(crate) fn publish(&self, resource: Resource<T>) -> bool {
        let mut state = lock(&self.shared);
        if state.latest.as_ref() != Some(&resource) {
            state
                .subscribers
                .retain(|subscriber| subscriber.send(resource.clone()).is_ok());
            state.latest = Some(resource);
        }
        !state.subscribers.is_empty()
    }

    pub(crate) fn stream(&self, guard: Arc<SessionGuard>) -> ResourceStream<T> {
        ResourceStream {
            receiver: subscribe(&self.shared),
            shared: self.shared.clone(),
            _session: guard,
        }
    }
}

impl<T> Drop for Publisher<T> {
    fn drop(&mut self) {
        let mut state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        state.closed = true;
        state.subscribers.clear();
    }
}

/// Aborts the session task once the last stream referencing it is gone.
pub(crate) struct SessionGuard {
    task: JoinHandle<()>,
}

impl SessionGuard {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Observable output of one synchronizer session.
///
/// Implements [`Stream`]; the stream ends when the session ends on its own
/// (after an error, or when the cache stops producing values).
pub struct ResourceStream<T> {
    receiver: mpsc::UnboundedReceiver<Resource<T>>,
    shared: Arc<Mutex<Shared<T>>>,
    _session: Arc<SessionGuard>,
}

impl<T: Clone> ResourceStream<T> {
    /// A new observer of the same session.
    ///
    /// Its first item is the latest published value, then it follows the
    /// session like any other stream. No fetch is triggered.
    pub fn resubscribe(&self) -> ResourceStream<T> {
        ResourceStream {
            receiver: subscribe(&self.shared),
            shared: self.shared.clone(),
            _session: self._session.clone(),
        }
    }

    /// The latest value the session published, if any.
    pub fn latest(&self) -> Option<Resource<T>> {
        lock(&self.shared).latest.clone()
    }

    /// Reads until the first terminal resource. `None` if the stream ends first.
    pub async fn wait_terminal(&mut self) -> Option<Resource<T>> {
        while let Some(resource) = self.receiver.recv().await {
            if resource.is_terminal() {
                return Some(resource);
            }
        }
        None
    }
}

impl<T> Stream for ResourceStream<T> {
    type Item = Resource<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
