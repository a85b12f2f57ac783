//! Single-flight memoization of asynchronous fetches.
//!
//! [`SingleFlightCache`] maps a string key to the shared handle of one fetch. The
//! first [`get`](SingleFlightCache::get) for a key runs the factory and stores its
//! handle before the fetch settles; every later `get` for that key receives the same
//! handle, so concurrent consumers share a single network call. Entries live until
//! they are invalidated, or until their fetch fails under
//! [`FailurePolicy::EvictOnFailure`].
//!
//! When called inside a tokio runtime, each new fetch is also driven by a spawned
//! task. A fetch whose every waiter has gone away still completes and fills the cache.

mod key;
mod policy;

pub use key::CacheKey;
pub use policy::{CacheMode, FailurePolicy};

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;

use crate::core::AnalyticsError;

type SharedFetch<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

/// A handle to one in-flight or settled fetch. Cloning it does not refetch.
pub struct Flight<T, E> {
    inner: SharedFetch<T, E>,
}

impl<T, E> Clone for Flight<T, E> {
    fn clone(&self) -> Self {
        Flight {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone, E: Clone> Flight<T, E> {
    /// Current state without waiting.
    pub fn state(&self) -> FetchState<T, E> {
        match self.inner.peek() {
            None => FetchState::Pending,
            Some(Ok(v)) => FetchState::Ready(v.clone()),
            Some(Err(e)) => FetchState::Failed(e.clone()),
        }
    }
}

impl<T: Clone, E: Clone> Future for Flight<T, E> {
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner).poll(cx)
    }
}

impl<T, E> fmt::Debug for Flight<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flight").finish_non_exhaustive()
    }
}

/// Snapshot of a cache entry, for consumers that poll rather than await.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T, E> {
    /// No entry for the key.
    Absent,
    /// A fetch is running.
    Pending,
    Ready(T),
    Failed(E),
}

impl<T, E> FetchState<T, E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn ready(self) -> Option<T> {
        match self {
            FetchState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

/// Counters for a cache, exposed so callers can tell served-from-cache from fresh fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// `get` calls that joined an existing entry.
    pub hits: u64,
    /// `get` calls that ran the factory.
    pub misses: u64,
    /// Entries removed because their fetch failed.
    pub evictions: u64,
}

struct Entry<T, E> {
    generation: u64,
    flight: SharedFetch<T, E>,
}

struct Inner<T, E> {
    entries: Mutex<HashMap<String, Entry<T, E>>>,
    next_generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<T, E> Inner<T, E> {
    // Only removes the entry created by the failed flight; a newer entry for the
    // same key (after an invalidate) is left alone.
    fn evict_if_current(&self, key: &str, generation: u64) -> bool {
        let mut entries = self.entries.lock();
        if entries.get(key).is_some_and(|e| e.generation == generation) {
            entries.remove(key);
            self.evictions.fetch_add(1, Ordering::Relaxed);
            return true;
        }
        false
    }
}

/// Memoized asynchronous results keyed by string, with at most one outstanding fetch per key.
///
/// Cloning is cheap and clones share entries.
pub struct SingleFlightCache<T, E = AnalyticsError> {
    name: Arc<str>,
    failure: FailurePolicy,
    inner: Arc<Inner<T, E>>,
}

impl<T, E> Clone for SingleFlightCache<T, E> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            failure: self.failure,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> fmt::Debug for SingleFlightCache<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleFlightCache")
            .field("name", &self.name)
            .field("failure", &self.failure)
            .field("len", &self.inner.entries.lock().len())
            .finish()
    }
}

impl<T, E> SingleFlightCache<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + fmt::Display + 'static,
{
    /// Creates an empty cache that evicts failed entries.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_failure_policy(name, FailurePolicy::default())
    }

    pub fn with_failure_policy(name: impl Into<Arc<str>>, failure: FailurePolicy) -> Self {
        Self {
            name: name.into(),
            failure,
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
                evictions: AtomicU64::new(0),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure
    }

    /// Returns the handle cached under `key`, or runs `factory` and caches its handle.
    ///
    /// Lookup and registration happen under one lock with no suspension in between,
    /// so two calls for the same key never both run the factory. `factory` runs while
    /// that lock is held and must not call back into this cache.
    pub fn get<F, Fut>(&self, key: impl AsRef<str>, factory: F) -> Flight<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let key = key.as_ref();
        let mut entries = self.inner.entries.lock();

        if let Some(entry) = entries.get(key) {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(cache = %self.name, key, "single-flight hit");
            return Flight {
                inner: entry.flight.clone(),
            };
        }

        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let flight = self.wrap(key.to_owned(), generation, factory());
        entries.insert(
            key.to_owned(),
            Entry {
                generation,
                flight: flight.clone(),
            },
        );
        drop(entries);

        tracing::debug!(cache = %self.name, key, "single-flight miss, fetch started");
        drive(&flight);
        Flight { inner: flight }
    }

    /// Like [`get`](Self::get), with the caller choosing how the cache is consulted.
    pub fn get_with<F, Fut>(&self, key: impl AsRef<str>, mode: CacheMode, factory: F) -> Flight<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        match mode {
            CacheMode::Use => self.get(key, factory),
            CacheMode::Refresh => {
                self.invalidate(key.as_ref());
                self.get(key, factory)
            }
            CacheMode::Bypass => Flight {
                inner: factory().boxed().shared(),
            },
        }
    }

    /// Removes the entry for `key`. Returns whether one existed.
    ///
    /// Waiters already holding the old handle still receive its result.
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.inner.entries.lock().remove(key).is_some();
        if removed {
            tracing::debug!(cache = %self.name, key, "invalidated");
        }
        removed
    }

    pub fn invalidate_all(&self) {
        let mut entries = self.inner.entries.lock();
        let n = entries.len();
        entries.clear();
        tracing::debug!(cache = %self.name, entries = n, "invalidated all");
    }

    pub fn state(&self, key: &str) -> FetchState<T, E> {
        let entries = self.inner.entries.lock();
        match entries.get(key) {
            None => FetchState::Absent,
            Some(entry) => Flight {
                inner: entry.flight.clone(),
            }
            .state(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            evictions: self.inner.evictions.load(Ordering::Relaxed),
        }
    }

    fn wrap<Fut>(&self, key: String, generation: u64, fetch: Fut) -> SharedFetch<T, E>
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let evict = self.failure == FailurePolicy::EvictOnFailure;
        let inner: Weak<Inner<T, E>> = Arc::downgrade(&self.inner);
        let name = Arc::clone(&self.name);

        async move {
            let result = fetch.await;
            if let Err(e) = &result {
                tracing::debug!(cache = %name, key = %key, error = %e, "fetch failed");
                if evict
                    && let Some(inner) = inner.upgrade()
                    && inner.evict_if_current(&key, generation)
                {
                    tracing::debug!(cache = %name, key = %key, "evicted failed entry");
                }
            }
            result
        }
        .boxed()
        .shared()
    }
}

// Polls the flight to completion on the ambient runtime, if any.
fn drive<T, E>(flight: &SharedFetch<T, E>)
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        let flight = flight.clone();
        handle.spawn(async move {
            let _ = flight.await;
        });
    }
}
