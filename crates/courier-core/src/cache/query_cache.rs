//! Client-side read-through cache for remote queries.
//!
//! Every remote read goes through one of these, keyed by [`QueryKey`].
//! Views subscribe to the keys they render; mutations invalidate the keys
//! they affect; the cache alone decides when to fetch. There is no server
//! push, so staleness is resolved only by explicit invalidation (or, for
//! entries carrying a refetch interval, by the interval elapsing).
//!
//! # Threading
//! The cache lives on the single logical UI thread. Fetches are spawned as
//! tokio tasks and deliver a [`FetchOutcome`] back over an mpsc channel;
//! the event loop drains the channel and feeds each outcome to
//! [`QueryCache::apply`]. Entries are mutated only by the cache itself, so
//! cached values cannot race.
//!
//! # Coalescing
//! At most one fetch is outstanding per key. Invalidations that land while
//! a fetch is in flight bump the entry's generation; when the stale
//! outcome arrives, exactly one follow-up fetch is dispatched.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::ApiError;
use crate::config::{PageWindow, UNREAD_COUNT_REFETCH_INTERVAL};
use crate::models::{ItemsPage, NotificationsPage, UnreadCount};

use super::QueryKey;

/// Payload of a successfully completed query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Notifications(NotificationsPage),
    UnreadCount(UnreadCount),
    Items(ItemsPage),
}

impl QueryData {
    pub fn as_notifications(&self) -> Option<&NotificationsPage> {
        match self {
            QueryData::Notifications(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&ItemsPage> {
        match self {
            QueryData::Items(page) => Some(page),
            _ => None,
        }
    }
}

/// Render-facing state of one cache entry.
///
/// The three states are mutually exclusive per render pass: `Loading`
/// until the first outcome lands, then whatever the last outcome was.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Loading,
    Success(QueryData),
    Error(ApiError),
}

/// Seam between the cache and the remote service.
///
/// The production implementation is the reqwest `ApiClient`; tests drive
/// the cache with a fake.
pub trait RemoteData: Send + Sync + 'static {
    fn fetch(
        &self,
        key: QueryKey,
        page: PageWindow,
    ) -> BoxFuture<'static, Result<QueryData, ApiError>>;
}

/// A completed fetch, delivered back to the UI thread over the cache's
/// outcome channel.
#[derive(Debug)]
pub struct FetchOutcome {
    pub key: QueryKey,
    pub result: Result<QueryData, ApiError>,
    generation: u64,
}

struct CacheEntry {
    state: QueryState,
    stale: bool,
    in_flight: bool,
    /// Bumped on every invalidation. An outcome carrying an older
    /// generation is itself stale and triggers one follow-up fetch.
    generation: u64,
    refetch_interval: Option<Duration>,
    last_fetched_at: Option<Instant>,
    subscribers: usize,
}

impl CacheEntry {
    fn new(refetch_interval: Option<Duration>) -> Self {
        Self {
            state: QueryState::Loading,
            stale: true,
            in_flight: false,
            generation: 0,
            refetch_interval,
            last_fetched_at: None,
            subscribers: 0,
        }
    }

    fn interval_elapsed(&self, now: Instant) -> bool {
        match (self.refetch_interval, self.last_fetched_at) {
            (Some(interval), Some(at)) => now.duration_since(at) >= interval,
            _ => false,
        }
    }
}

pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    remote: Arc<dyn RemoteData>,
    page: PageWindow,
    outcome_tx: UnboundedSender<FetchOutcome>,
}

impl QueryCache {
    pub fn new(
        remote: Arc<dyn RemoteData>,
        page: PageWindow,
        outcome_tx: UnboundedSender<FetchOutcome>,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            remote,
            page,
            outcome_tx,
        }
    }

    /// Current state for a key. `Loading` until the first outcome lands,
    /// including for keys nothing has subscribed to yet.
    pub fn state(&self, key: QueryKey) -> QueryState {
        self.entries
            .get(&key)
            .map(|entry| entry.state.clone())
            .unwrap_or(QueryState::Loading)
    }

    /// Unread total from the badge query, zero while unknown.
    pub fn unread_count(&self) -> i64 {
        match self.state(QueryKey::NotificationsUnreadCount) {
            QueryState::Success(QueryData::UnreadCount(count)) => count.unread_count.max(0),
            _ => 0,
        }
    }

    /// Register interest in a key. The entry is created on first
    /// subscription; a fetch is dispatched unless fresh data already
    /// exists or one is outstanding.
    pub fn subscribe(&mut self, key: QueryKey) {
        let needs_fetch = {
            let entry = self
                .entries
                .entry(key)
                .or_insert_with(|| CacheEntry::new(refetch_interval_for(key)));
            entry.subscribers += 1;
            entry.stale && !entry.in_flight
        };
        if needs_fetch {
            self.dispatch(key);
        }
    }

    /// Cancel interest in a key's updates. The entry and any in-flight
    /// request survive; retention is the cache's business.
    pub fn unsubscribe(&mut self, key: QueryKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
        }
    }

    /// Mark an entry stale and queue a refetch for active subscribers.
    ///
    /// Invalidations landing while a fetch is outstanding coalesce; see
    /// the module docs.
    pub fn invalidate(&mut self, key: QueryKey) {
        let needs_fetch = {
            let Some(entry) = self.entries.get_mut(&key) else {
                return;
            };
            entry.stale = true;
            entry.generation += 1;
            entry.subscribers > 0 && !entry.in_flight
        };
        if needs_fetch {
            self.dispatch(key);
        }
    }

    /// Dispatch interval-driven refetches. Called from the event loop tick.
    pub fn tick(&mut self, now: Instant) {
        let due: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| {
                entry.subscribers > 0 && !entry.in_flight && entry.interval_elapsed(now)
            })
            .map(|(key, _)| *key)
            .collect();
        for key in due {
            self.dispatch(key);
        }
    }

    /// Fold a completed fetch back into its entry.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        let needs_refetch = {
            let Some(entry) = self.entries.get_mut(&outcome.key) else {
                return;
            };
            entry.in_flight = false;
            entry.last_fetched_at = Some(Instant::now());
            if let Err(ref err) = outcome.result {
                tracing::warn!(key = %outcome.key, error = %err, "query fetch failed");
            }
            entry.state = match outcome.result {
                Ok(data) => QueryState::Success(data),
                Err(err) => QueryState::Error(err),
            };
            if entry.generation > outcome.generation {
                // Invalidated while this fetch was outstanding.
                true
            } else {
                entry.stale = false;
                false
            }
        };
        if needs_refetch {
            self.dispatch(outcome.key);
        }
    }

    fn dispatch(&mut self, key: QueryKey) {
        let Some(entry) = self.entries.get_mut(&key) else {
            return;
        };
        debug_assert!(!entry.in_flight, "at most one outstanding fetch per key");
        entry.in_flight = true;
        let generation = entry.generation;
        let future = self.remote.fetch(key, self.page);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = future.await;
            // The receiver may be gone during shutdown.
            let _ = tx.send(FetchOutcome {
                key,
                result,
                generation,
            });
        });
    }
}

fn refetch_interval_for(key: QueryKey) -> Option<Duration> {
    match key {
        QueryKey::NotificationsUnreadCount => Some(UNREAD_COUNT_REFETCH_INTERVAL),
        QueryKey::Notifications | QueryKey::Items => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::sync::oneshot;

    /// Fake remote that records every fetch and resolves each one only
    /// when the test says so.
    struct FakeRemote {
        calls: Mutex<Vec<QueryKey>>,
        pending: Mutex<VecDeque<oneshot::Receiver<Result<QueryData, ApiError>>>>,
    }

    impl FakeRemote {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                pending: Mutex::new(VecDeque::new()),
            })
        }

        /// Queue a responder for the next fetch; the returned sender
        /// completes it.
        fn expect(&self) -> oneshot::Sender<Result<QueryData, ApiError>> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().unwrap().push_back(rx);
            tx
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl RemoteData for FakeRemote {
        fn fetch(
            &self,
            key: QueryKey,
            _page: PageWindow,
        ) -> BoxFuture<'static, Result<QueryData, ApiError>> {
            self.calls.lock().unwrap().push(key);
            let responder = self.pending.lock().unwrap().pop_front();
            Box::pin(async move {
                match responder {
                    Some(rx) => rx
                        .await
                        .unwrap_or_else(|_| Err(ApiError::Transport("responder dropped".into()))),
                    None => Err(ApiError::Transport("unexpected fetch".into())),
                }
            })
        }
    }

    fn new_cache(
        remote: Arc<FakeRemote>,
    ) -> (QueryCache, UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (QueryCache::new(remote, PageWindow::default(), tx), rx)
    }

    fn unread(n: i64) -> QueryData {
        QueryData::UnreadCount(UnreadCount { unread_count: n })
    }

    fn empty_items() -> QueryData {
        QueryData::Items(ItemsPage {
            data: Vec::new(),
            count: 0,
        })
    }

    #[tokio::test]
    async fn first_subscription_fetches_and_populates() {
        let remote = FakeRemote::new();
        let (mut cache, mut rx) = new_cache(remote.clone());

        let responder = remote.expect();
        cache.subscribe(QueryKey::Items);
        assert_eq!(remote.call_count(), 1);
        assert_eq!(cache.state(QueryKey::Items), QueryState::Loading);

        responder.send(Ok(empty_items())).unwrap();
        let outcome = rx.recv().await.unwrap();
        cache.apply(outcome);
        assert_eq!(
            cache.state(QueryKey::Items),
            QueryState::Success(empty_items())
        );
    }

    #[tokio::test]
    async fn second_subscriber_reuses_fresh_data() {
        let remote = FakeRemote::new();
        let (mut cache, mut rx) = new_cache(remote.clone());

        let responder = remote.expect();
        cache.subscribe(QueryKey::Items);
        responder.send(Ok(empty_items())).unwrap();
        cache.apply(rx.recv().await.unwrap());

        cache.subscribe(QueryKey::Items);
        assert_eq!(remote.call_count(), 1);
    }

    #[tokio::test]
    async fn invalidation_refetches_once() {
        let remote = FakeRemote::new();
        let (mut cache, mut rx) = new_cache(remote.clone());

        let responder = remote.expect();
        cache.subscribe(QueryKey::Items);
        responder.send(Ok(empty_items())).unwrap();
        cache.apply(rx.recv().await.unwrap());

        let responder = remote.expect();
        cache.invalidate(QueryKey::Items);
        assert_eq!(remote.call_count(), 2);

        responder.send(Ok(empty_items())).unwrap();
        cache.apply(rx.recv().await.unwrap());
        assert_eq!(remote.call_count(), 2);
    }

    #[tokio::test]
    async fn invalidations_during_flight_coalesce_to_one_refetch() {
        let remote = FakeRemote::new();
        let (mut cache, mut rx) = new_cache(remote.clone());

        let responder = remote.expect();
        cache.subscribe(QueryKey::Items);

        // Two invalidations land while the first fetch is outstanding.
        cache.invalidate(QueryKey::Items);
        cache.invalidate(QueryKey::Items);
        assert_eq!(remote.call_count(), 1);

        let followup = remote.expect();
        responder.send(Ok(empty_items())).unwrap();
        cache.apply(rx.recv().await.unwrap());
        // Exactly one follow-up fetch for both invalidations.
        assert_eq!(remote.call_count(), 2);

        followup.send(Ok(empty_items())).unwrap();
        cache.apply(rx.recv().await.unwrap());
        assert_eq!(remote.call_count(), 2);
    }

    #[tokio::test]
    async fn interval_entry_refetches_after_the_interval() {
        let remote = FakeRemote::new();
        let (mut cache, mut rx) = new_cache(remote.clone());

        let responder = remote.expect();
        cache.subscribe(QueryKey::NotificationsUnreadCount);
        responder.send(Ok(unread(3))).unwrap();
        cache.apply(rx.recv().await.unwrap());
        assert_eq!(cache.unread_count(), 3);

        // Not yet due.
        cache.tick(Instant::now());
        assert_eq!(remote.call_count(), 1);

        let responder = remote.expect();
        cache.tick(Instant::now() + UNREAD_COUNT_REFETCH_INTERVAL);
        assert_eq!(remote.call_count(), 2);

        // Due again while in flight: no second dispatch.
        cache.tick(Instant::now() + UNREAD_COUNT_REFETCH_INTERVAL);
        assert_eq!(remote.call_count(), 2);

        responder.send(Ok(unread(101))).unwrap();
        cache.apply(rx.recv().await.unwrap());
        assert_eq!(cache.unread_count(), 101);
    }

    #[tokio::test]
    async fn list_entries_never_refetch_on_tick() {
        let remote = FakeRemote::new();
        let (mut cache, mut rx) = new_cache(remote.clone());

        let responder = remote.expect();
        cache.subscribe(QueryKey::Notifications);
        responder
            .send(Ok(QueryData::Notifications(NotificationsPage {
                data: Vec::new(),
                count: 0,
                unread_count: 0,
            })))
            .unwrap();
        cache.apply(rx.recv().await.unwrap());

        cache.tick(Instant::now() + Duration::from_secs(3600));
        assert_eq!(remote.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_surfaces_as_error_state() {
        let remote = FakeRemote::new();
        let (mut cache, mut rx) = new_cache(remote.clone());

        let responder = remote.expect();
        cache.subscribe(QueryKey::Items);
        responder
            .send(Err(ApiError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            }))
            .unwrap();
        cache.apply(rx.recv().await.unwrap());

        match cache.state(QueryKey::Items) {
            QueryState::Error(err) => assert!(!err.is_auth()),
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unsubscribed_entries_keep_their_data_but_stop_refetching() {
        let remote = FakeRemote::new();
        let (mut cache, mut rx) = new_cache(remote.clone());

        let responder = remote.expect();
        cache.subscribe(QueryKey::NotificationsUnreadCount);
        responder.send(Ok(unread(5))).unwrap();
        cache.apply(rx.recv().await.unwrap());

        cache.unsubscribe(QueryKey::NotificationsUnreadCount);
        cache.tick(Instant::now() + UNREAD_COUNT_REFETCH_INTERVAL);
        assert_eq!(remote.call_count(), 1);

        // Invalidation without subscribers marks stale but fetches nothing.
        cache.invalidate(QueryKey::NotificationsUnreadCount);
        assert_eq!(remote.call_count(), 1);
        assert_eq!(cache.unread_count(), 5);

        // Resubscribing picks the stale entry back up.
        let _responder = remote.expect();
        cache.subscribe(QueryKey::NotificationsUnreadCount);
        assert_eq!(remote.call_count(), 2);
    }

    #[tokio::test]
    async fn unread_count_is_zero_while_loading() {
        let remote = FakeRemote::new();
        let (cache, _rx) = new_cache(remote);
        assert_eq!(cache.unread_count(), 0);
    }
}
