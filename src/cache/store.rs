use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

use crate::api::ApiError;

/// Consider cached data stale after 5 minutes.
/// Reads within the window are served from memory without a network call.
const CACHE_STALE_MINUTES: i64 = 5;

/// Lifecycle state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    /// No fetch has been issued for this key.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Success,
    /// The last fetch failed; previously cached data is retained.
    Error,
}

/// Snapshot of a cache entry handed to readers.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    /// Last successfully fetched data; empty if nothing has been fetched.
    pub data: T,
    pub state: QueryState,
    /// When the data was last fetched, if ever. Cleared by invalidation.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl<T: Default> QueryResult<T> {
    /// Snapshot for a key that has never been queried.
    pub fn idle() -> Self {
        Self {
            data: T::default(),
            state: QueryState::Idle,
            fetched_at: None,
        }
    }
}

impl<T> QueryResult<T> {
    pub fn is_loading(&self) -> bool {
        self.state == QueryState::Loading
    }

    pub fn is_error(&self) -> bool {
        self.state == QueryState::Error
    }
}

struct CacheEntry<T> {
    data: Option<T>,
    fetched_at: Option<DateTime<Utc>>,
    state: QueryState,
    last_error: Option<String>,
    /// Present while a fetch is in flight; completion is broadcast to
    /// every reader waiting on this key.
    in_flight: Option<broadcast::Sender<()>>,
}

impl<T> CacheEntry<T> {
    fn new() -> Self {
        Self {
            data: None,
            fetched_at: None,
            state: QueryState::Idle,
            last_error: None,
            in_flight: None,
        }
    }
}

impl<T: Clone + Default> CacheEntry<T> {
    fn snapshot(&self) -> QueryResult<T> {
        QueryResult {
            data: self.data.clone().unwrap_or_default(),
            state: self.state,
            fetched_at: self.fetched_at,
        }
    }

    fn is_fresh(&self, stale_after: Duration) -> bool {
        self.state == QueryState::Success
            && self
                .fetched_at
                .is_some_and(|at| Utc::now() - at <= stale_after)
    }
}

/// Process-wide cache of query results, keyed by `K`.
///
/// Entries are created on the first read for a key and never evicted.
/// Clone shares the underlying store; the lock is never held across an
/// await, so readers and writers for independent keys do not contend in
/// any observable way.
pub struct QueryCache<K, T> {
    entries: Arc<Mutex<HashMap<K, CacheEntry<T>>>>,
    stale_after: Duration,
}

impl<K, T> Clone for QueryCache<K, T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            stale_after: self.stale_after,
        }
    }
}

impl<K, T> Default for QueryCache<K, T>
where
    K: Clone + Eq + Hash + Send + 'static,
    T: Clone + Default + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> QueryCache<K, T>
where
    K: Clone + Eq + Hash + Send + 'static,
    T: Clone + Default + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            stale_after: Duration::minutes(CACHE_STALE_MINUTES),
        }
    }

    /// Override the stale threshold.
    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    /// Read the data for `key`, fetching if nothing fresh is cached.
    ///
    /// Concurrent reads for the same key while a fetch is in flight join
    /// that fetch instead of issuing another request. The fetch runs on
    /// its own task, so dropping a waiting caller does not abort it; the
    /// result still lands in the cache.
    pub async fn fetch<F, Fut>(&self, key: K, fetcher: F) -> QueryResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let mut rx = {
            let mut entries = self.entries.lock().await;
            let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);

            if let Some(tx) = &entry.in_flight {
                tx.subscribe()
            } else if entry.is_fresh(self.stale_after) {
                return entry.snapshot();
            } else {
                debug!("Cache miss or stale entry, fetching");
                let (tx, rx) = broadcast::channel(1);
                entry.in_flight = Some(tx);
                entry.state = QueryState::Loading;
                self.spawn_fetch(key.clone(), fetcher());
                rx
            }
        };

        // Wait for the in-flight fetch to settle, then report whatever it
        // produced. A closed channel means the result already landed.
        let _ = rx.recv().await;

        let entries = self.entries.lock().await;
        entries
            .get(&key)
            .map(|entry| entry.snapshot())
            .unwrap_or_else(QueryResult::idle)
    }

    /// Run the fetcher to completion on its own task and apply the result
    /// to the entry, notifying every waiter.
    fn spawn_fetch<Fut>(&self, key: K, fut: Fut)
    where
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let entries = Arc::clone(&self.entries);
        tokio::spawn(async move {
            let result = fut.await;

            let mut entries = entries.lock().await;
            let Some(entry) = entries.get_mut(&key) else {
                return;
            };

            match result {
                Ok(data) => {
                    entry.data = Some(data);
                    entry.fetched_at = Some(Utc::now());
                    entry.state = QueryState::Success;
                    entry.last_error = None;
                }
                Err(e) => {
                    warn!(error = %e, "Fetch failed, keeping previously cached data");
                    entry.state = QueryState::Error;
                    entry.last_error = Some(e.to_string());
                }
            }

            if let Some(tx) = entry.in_flight.take() {
                // Send can fail when every waiter has been dropped.
                let _ = tx.send(());
            }
        });
    }

    /// Mark `key` stale so the next read refetches. Cached data is kept;
    /// a fetch already in flight is left to settle on its own. Unknown
    /// keys are a no-op: entries only exist once a read has been issued.
    pub async fn invalidate(&self, key: &K) {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(key) {
            debug!("Invalidating cache entry");
            entry.fetched_at = None;
        }
    }

    /// Current state for `key` without triggering a fetch.
    pub async fn snapshot(&self, key: &K) -> QueryResult<T> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .map(|entry| entry.snapshot())
            .unwrap_or_else(QueryResult::idle)
    }

    /// Last recorded fetch error for `key`, if the entry is in the error
    /// state.
    pub async fn last_error(&self, key: &K) -> Option<String> {
        let entries = self.entries.lock().await;
        entries.get(key).and_then(|entry| entry.last_error.clone())
    }
}
