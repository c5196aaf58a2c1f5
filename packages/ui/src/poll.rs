//! # Stale-while-revalidate polling cache
//!
//! Keyed cache of the last-known response for each server resource, refreshed
//! by background re-fetch on a timer and shared by every subscriber of a key.
//! This replaces the per-view fetching the original client grew: one cache
//! instance lives in context, and all views observe `(data, error, loading)`
//! through [`use_poll`].
//!
//! Semantics, in one place:
//!
//! - The first subscriber of a key fetches immediately; later subscribers are
//!   served the cached value instantly and only revalidate when the entry has
//!   aged past tolerance.
//! - A `refresh_interval_ms` re-issues the fetch on a timer; the timer dies
//!   with the last subscriber.
//! - Simultaneous subscribers share one in-flight request per key.
//! - Success replaces data and clears the error atomically from the readers'
//!   point of view; failure records the error and keeps the last good data.
//! - Fetches carry monotonically increasing sequence numbers per key; a
//!   completion older than the newest applied one is dropped, as is any
//!   completion arriving after the last subscriber detached.
//! - A fetch whose task is cancelled mid-flight releases its claim on the
//!   key, so remaining or future subscribers can fetch again.
//! - [`PollCache::invalidate`] schedules an immediate re-fetch for the key's
//!   current subscribers, independent of the timer. Mutations call it instead
//!   of updating cached data themselves.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use dioxus::prelude::*;

use api::ApiError;

use crate::platform::{now_ms, sleep};

/// Cache keys and poll intervals for every resource this app observes.
pub mod keys {
    pub const RECORDINGS: &str = "/recordings/";
    pub const RECORDER_STATE: &str = "/recorder_state";
    pub const ME: &str = "/users/me";
    pub const MY_PERMISSIONS: &str = "/permissions/my";
    pub const USERS: &str = "/users";
    pub const GROUPS: &str = "/recordings/groups";

    pub const RECORDINGS_INTERVAL_MS: u64 = 10_000;
    pub const RECORDER_STATE_INTERVAL_MS: u64 = 2_000;
}

/// Granularity of the driver loop; invalidations are picked up within a tick.
const POLL_TICK_MS: u64 = 250;

/// A cached entry older than this revalidates when a new subscriber mounts.
const MOUNT_REVALIDATE_AGE_MS: f64 = 5_000.0;

/// What one subscriber sees for one key.
pub struct PollState<T> {
    pub data: Option<Rc<T>>,
    pub error: Option<ApiError>,
    /// True until the first fetch for the key completes either way.
    pub is_loading: bool,
}

impl<T> PollState<T> {
    fn empty() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
        }
    }
}

impl<T> Clone for PollState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: self.is_loading,
        }
    }
}

#[derive(Default)]
struct Entry {
    data: Option<Rc<dyn Any>>,
    error: Option<ApiError>,
    last_fetched_at: Option<f64>,
    subscribers: usize,
    next_seq: u64,
    in_flight: Option<u64>,
    applied_seq: Option<u64>,
    needs_refetch: bool,
}

/// The synchronous transition core. Every mutation happens between await
/// points, so each call is atomic with respect to all readers.
#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Entry>,
}

impl CacheState {
    fn entry_mut(&mut self, key: &str) -> &mut Entry {
        self.entries.entry(key.to_string()).or_default()
    }

    fn subscribe(&mut self, key: &str) {
        self.entry_mut(key).subscribers += 1;
    }

    /// Detach one subscriber. Cached data is kept for future subscribers, but
    /// a fetch in flight will have its completion dropped.
    fn unsubscribe(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
        }
    }

    /// Claim the right to fetch `key`. Returns the fetch sequence number, or
    /// `None` when another fetch is already in flight (request de-duplication)
    /// or nobody is subscribed anymore.
    fn begin_fetch(&mut self, key: &str) -> Option<u64> {
        let entry = self.entry_mut(key);
        if entry.subscribers == 0 || entry.in_flight.is_some() {
            return None;
        }
        let seq = entry.next_seq;
        entry.next_seq += 1;
        entry.in_flight = Some(seq);
        entry.needs_refetch = false;
        Some(seq)
    }

    /// Apply a fetch completion. Returns whether anything was applied: stale
    /// (out-of-order) completions and completions after the last subscriber
    /// detached are no-ops.
    fn complete(
        &mut self,
        key: &str,
        seq: u64,
        result: Result<Rc<dyn Any>, ApiError>,
        now: f64,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if entry.in_flight == Some(seq) {
            entry.in_flight = None;
        }
        if entry.subscribers == 0 {
            return false;
        }
        if entry.applied_seq.is_some_and(|applied| seq <= applied) {
            return false;
        }
        entry.applied_seq = Some(seq);
        entry.last_fetched_at = Some(now);
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
            }
            // Stale-on-error: the last good data stays visible.
            Err(err) => entry.error = Some(err),
        }
        true
    }

    fn invalidate(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.needs_refetch = true;
        }
    }

    /// Release a claimed ticket without a completion. Called when the fetch
    /// that claimed it is dropped mid-flight; a newer claim is left alone.
    fn abandon(&mut self, key: &str, seq: u64) {
        if let Some(entry) = self.entries.get_mut(key) {
            if entry.in_flight == Some(seq) {
                entry.in_flight = None;
            }
        }
    }

    /// Should a freshly mounted subscriber revalidate right away?
    fn should_revalidate_on_mount(&self, key: &str, now: f64) -> bool {
        match self.entries.get(key) {
            None => true,
            Some(entry) => match entry.last_fetched_at {
                None => entry.in_flight.is_none(),
                Some(at) => now - at >= MOUNT_REVALIDATE_AGE_MS,
            },
        }
    }

    /// Is a timer- or invalidation-driven fetch due on this tick?
    fn fetch_due(&self, key: &str, interval_ms: Option<u64>, now: f64) -> bool {
        let Some(entry) = self.entries.get(key) else {
            return false;
        };
        if entry.in_flight.is_some() {
            return false;
        }
        if entry.needs_refetch {
            return true;
        }
        match entry.last_fetched_at {
            None => true,
            Some(at) => interval_ms.is_some_and(|ms| now - at >= ms as f64),
        }
    }

    fn snapshot<T: 'static>(&self, key: &str) -> PollState<T> {
        let Some(entry) = self.entries.get(key) else {
            return PollState {
                data: None,
                error: None,
                is_loading: true,
            };
        };
        let data = entry
            .data
            .clone()
            .and_then(|rc| rc.downcast::<T>().ok());
        PollState {
            is_loading: entry.last_fetched_at.is_none(),
            error: entry.error.clone(),
            data,
        }
    }
}

/// Handle to the app-wide cache. Cheap to clone; provided by [`PollProvider`].
#[derive(Clone)]
pub struct PollCache {
    state: Rc<RefCell<CacheState>>,
    version: Signal<u64>,
}

impl PollCache {
    fn new(version: Signal<u64>) -> Self {
        Self {
            state: Rc::new(RefCell::new(CacheState::default())),
            version,
        }
    }

    /// Read the version signal so the calling scope re-runs on cache changes.
    pub fn track(&self) {
        let _ = (self.version)();
    }

    fn bump(&self) {
        let mut version = self.version;
        *version.write() += 1;
    }

    /// Last-known state for `key`, without subscribing the caller's scope.
    pub fn read<T: 'static>(&self, key: &str) -> PollState<T> {
        self.state.borrow().snapshot(key)
    }

    /// Schedule an immediate re-fetch for all current subscribers of `key`.
    /// Call after any mutation that changes what the key would return.
    pub fn invalidate(&self, key: &str) {
        self.state.borrow_mut().invalidate(key);
        self.bump();
    }

    fn subscribe(&self, key: &str) {
        self.state.borrow_mut().subscribe(key);
    }

    fn unsubscribe(&self, key: &str) {
        self.state.borrow_mut().unsubscribe(key);
    }
}

/// Per-subscription options.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct PollOptions {
    /// Re-fetch on this repeating interval. `None` means the key only
    /// refreshes on invalidation.
    pub refresh_interval_ms: Option<u64>,
}

impl PollOptions {
    pub fn interval(ms: u64) -> Self {
        Self {
            refresh_interval_ms: Some(ms),
        }
    }

    pub fn once() -> Self {
        Self::default()
    }
}

/// Provides the single [`PollCache`] the whole app shares.
#[component]
pub fn PollProvider(children: Element) -> Element {
    let version = use_signal(|| 0u64);
    use_context_provider(|| PollCache::new(version));
    rsx! {
        {children}
    }
}

pub fn use_poll_cache() -> PollCache {
    use_context::<PollCache>()
}

/// Subscribe this component to a polled resource.
///
/// `key = None` disables fetching entirely; the hook returns an empty state
/// and issues no request, which is how conditional (e.g. admin-only)
/// subscriptions stay silent for everyone else. The key is fixed for the
/// lifetime of the component instance.
///
/// The driver task is cancelled and the subscription released when the
/// component unmounts; a response that arrives after detachment is never
/// applied.
pub fn use_poll<T, F, Fut>(key: Option<&str>, options: PollOptions, fetch: F) -> PollState<T>
where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: std::future::Future<Output = Result<T, ApiError>> + 'static,
{
    let cache = use_poll_cache();
    let key: Option<String> = key.map(String::from);

    let task: Option<Task> = use_hook({
        let cache = cache.clone();
        let key = key.clone();
        move || {
            let key = key?;
            cache.subscribe(&key);
            Some(spawn(poll_driver(cache, key, options, fetch)))
        }
    });

    use_drop({
        let cache = cache.clone();
        let key = key.clone();
        move || {
            if let Some(task) = task {
                task.cancel();
            }
            if let Some(key) = key {
                cache.unsubscribe(&key);
            }
        }
    });

    // Re-render whenever any fetch lands or an invalidation is issued.
    cache.track();

    match key {
        Some(key) => cache.read(&key),
        None => PollState::empty(),
    }
}

async fn poll_driver<T, F, Fut>(cache: PollCache, key: String, options: PollOptions, fetch: F)
where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: std::future::Future<Output = Result<T, ApiError>> + 'static,
{
    // Serve stale data instantly; revalidate now only if the entry is old.
    let revalidate = cache
        .state
        .borrow()
        .should_revalidate_on_mount(&key, now_ms());
    if revalidate {
        run_fetch(&cache, &key, &fetch).await;
    }

    loop {
        sleep(POLL_TICK_MS).await;
        let due = cache
            .state
            .borrow()
            .fetch_due(&key, options.refresh_interval_ms, now_ms());
        if due {
            run_fetch(&cache, &key, &fetch).await;
        }
    }
}

/// Holds a claimed fetch ticket for the duration of the request. Dropping the
/// guard without a completion (the driver task was cancelled mid-await)
/// releases the claim, so other subscribers of the key can fetch again.
/// After a completion the release is a no-op: `complete` has already cleared
/// the ticket, and a newer claim never matches this sequence number.
struct FetchTicket {
    state: Rc<RefCell<CacheState>>,
    key: String,
    seq: u64,
}

impl Drop for FetchTicket {
    fn drop(&mut self) {
        self.state.borrow_mut().abandon(&self.key, self.seq);
    }
}

async fn run_fetch<T, F, Fut>(cache: &PollCache, key: &str, fetch: &F)
where
    T: 'static,
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, ApiError>>,
{
    let Some(seq) = cache.state.borrow_mut().begin_fetch(key) else {
        return;
    };
    let _ticket = FetchTicket {
        state: Rc::clone(&cache.state),
        key: key.to_string(),
        seq,
    };
    let result = fetch().await.map(|value| Rc::new(value) as Rc<dyn Any>);
    if let Err(err) = &result {
        tracing::warn!("fetch for {key} failed: {err}");
    }
    let applied = cache.state.borrow_mut().complete(key, seq, result, now_ms());
    if applied {
        cache.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "/recordings/";

    fn boxed(value: i32) -> Rc<dyn Any> {
        Rc::new(value)
    }

    fn data(state: &CacheState) -> Option<i32> {
        state.snapshot::<i32>(KEY).data.map(|rc| *rc)
    }

    #[test]
    fn first_subscriber_fetches_immediately() {
        let mut state = CacheState::default();
        state.subscribe(KEY);
        assert!(state.should_revalidate_on_mount(KEY, 0.0));

        let seq = state.begin_fetch(KEY).unwrap();
        assert!(state.complete(KEY, seq, Ok(boxed(1)), 100.0));
        assert_eq!(data(&state), Some(1));
        assert!(!state.snapshot::<i32>(KEY).is_loading);
    }

    #[test]
    fn concurrent_fetches_are_deduplicated() {
        let mut state = CacheState::default();
        state.subscribe(KEY);
        state.subscribe(KEY);

        let seq = state.begin_fetch(KEY);
        assert!(seq.is_some());
        // Second subscriber's driver loses the race and does not fetch.
        assert!(state.begin_fetch(KEY).is_none());

        state.complete(KEY, seq.unwrap(), Ok(boxed(7)), 1.0);
        assert!(state.begin_fetch(KEY).is_some());
    }

    #[test]
    fn out_of_order_completion_is_a_no_op() {
        let mut state = CacheState::default();
        state.subscribe(KEY);

        let old_seq = state.begin_fetch(KEY).unwrap();
        // The old fetch stalls; an invalidation triggers a newer one whose
        // response arrives first.
        state.entries.get_mut(KEY).unwrap().in_flight = None;
        let new_seq = state.begin_fetch(KEY).unwrap();
        assert!(new_seq > old_seq);

        assert!(state.complete(KEY, new_seq, Ok(boxed(2)), 10.0));
        assert!(!state.complete(KEY, old_seq, Ok(boxed(1)), 11.0));
        assert_eq!(data(&state), Some(2));
    }

    #[test]
    fn failure_preserves_last_good_data() {
        let mut state = CacheState::default();
        state.subscribe(KEY);

        let seq = state.begin_fetch(KEY).unwrap();
        state.complete(KEY, seq, Ok(boxed(42)), 1.0);

        state.invalidate(KEY);
        assert!(state.fetch_due(KEY, None, 2.0));
        let seq = state.begin_fetch(KEY).unwrap();
        state.complete(
            KEY,
            seq,
            Err(ApiError::Transport("connection refused".into())),
            3.0,
        );

        let snapshot = state.snapshot::<i32>(KEY);
        assert_eq!(snapshot.data.map(|rc| *rc), Some(42));
        assert!(snapshot.error.is_some());

        // The next success clears the error again.
        state.invalidate(KEY);
        let seq = state.begin_fetch(KEY).unwrap();
        state.complete(KEY, seq, Ok(boxed(43)), 4.0);
        let snapshot = state.snapshot::<i32>(KEY);
        assert_eq!(snapshot.data.map(|rc| *rc), Some(43));
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn invalidation_makes_a_fetch_due_regardless_of_timer() {
        let mut state = CacheState::default();
        state.subscribe(KEY);
        let seq = state.begin_fetch(KEY).unwrap();
        state.complete(KEY, seq, Ok(boxed(1)), 1_000.0);

        // Fresh entry, long interval: nothing due.
        assert!(!state.fetch_due(KEY, Some(10_000), 2_000.0));
        state.invalidate(KEY);
        assert!(state.fetch_due(KEY, Some(10_000), 2_000.0));
    }

    #[test]
    fn interval_elapses_and_fetch_becomes_due() {
        let mut state = CacheState::default();
        state.subscribe(KEY);
        let seq = state.begin_fetch(KEY).unwrap();
        state.complete(KEY, seq, Ok(boxed(1)), 0.0);

        assert!(!state.fetch_due(KEY, Some(10_000), 5_000.0));
        assert!(state.fetch_due(KEY, Some(10_000), 10_000.0));
        // No interval: never due on its own.
        assert!(!state.fetch_due(KEY, None, 1_000_000.0));
    }

    #[test]
    fn detaching_the_last_subscriber_stops_fetching() {
        let mut state = CacheState::default();
        state.subscribe(KEY);
        let seq = state.begin_fetch(KEY).unwrap();
        state.unsubscribe(KEY);

        // A response arriving after detachment is dropped...
        assert!(!state.complete(KEY, seq, Ok(boxed(9)), 1.0));
        assert_eq!(data(&state), None);
        // ...and no new fetch can start.
        assert!(state.begin_fetch(KEY).is_none());
    }

    #[test]
    fn cancelled_fetch_releases_its_ticket() {
        let state = Rc::new(RefCell::new(CacheState::default()));
        state.borrow_mut().subscribe(KEY);
        let seq = state.borrow_mut().begin_fetch(KEY).unwrap();
        {
            let _ticket = FetchTicket {
                state: Rc::clone(&state),
                key: KEY.to_string(),
                seq,
            };
            // Driver task dropped mid-await: no completion ever arrives.
        }
        assert!(state.borrow().fetch_due(KEY, None, 0.0));
        assert!(state.borrow_mut().begin_fetch(KEY).is_some());
    }

    #[test]
    fn remount_after_a_cancelled_fetch_still_revalidates() {
        let state = Rc::new(RefCell::new(CacheState::default()));
        state.borrow_mut().subscribe(KEY);
        let seq = state.borrow_mut().begin_fetch(KEY).unwrap();
        let ticket = FetchTicket {
            state: Rc::clone(&state),
            key: KEY.to_string(),
            seq,
        };

        // The subscriber unmounts while its fetch is in flight.
        state.borrow_mut().unsubscribe(KEY);
        drop(ticket);

        state.borrow_mut().subscribe(KEY);
        assert!(state.borrow().should_revalidate_on_mount(KEY, 0.0));
        assert!(state.borrow_mut().begin_fetch(KEY).is_some());
    }

    #[test]
    fn surviving_subscriber_recovers_when_the_claimer_unmounts() {
        let state = Rc::new(RefCell::new(CacheState::default()));
        state.borrow_mut().subscribe(KEY);
        state.borrow_mut().subscribe(KEY);

        let seq = state.borrow_mut().begin_fetch(KEY).unwrap();
        let ticket = FetchTicket {
            state: Rc::clone(&state),
            key: KEY.to_string(),
            seq,
        };
        state.borrow_mut().unsubscribe(KEY);
        drop(ticket);

        // The remaining subscriber's driver can claim the key again.
        assert!(state.borrow_mut().begin_fetch(KEY).is_some());
    }

    #[test]
    fn a_release_never_clobbers_a_newer_claim() {
        let mut state = CacheState::default();
        state.subscribe(KEY);
        let old_seq = state.begin_fetch(KEY).unwrap();
        state.abandon(KEY, old_seq);
        let new_seq = state.begin_fetch(KEY).unwrap();

        // The old ticket's guard fires after the new claim; it must not free it.
        state.abandon(KEY, old_seq);
        assert!(state.begin_fetch(KEY).is_none());

        assert!(state.complete(KEY, new_seq, Ok(boxed(3)), 1.0));
        assert_eq!(data(&state), Some(3));
    }

    #[test]
    fn cached_data_survives_detach_for_the_next_subscriber() {
        let mut state = CacheState::default();
        state.subscribe(KEY);
        let seq = state.begin_fetch(KEY).unwrap();
        state.complete(KEY, seq, Ok(boxed(5)), 1_000.0);
        state.unsubscribe(KEY);

        // Remount shortly after: stale value served, no immediate revalidate.
        state.subscribe(KEY);
        assert_eq!(data(&state), Some(5));
        assert!(!state.should_revalidate_on_mount(KEY, 2_000.0));
        // Much later the entry is considered too old.
        assert!(state.should_revalidate_on_mount(KEY, 20_000.0));
    }

    #[test]
    fn snapshot_with_mismatched_type_yields_no_data() {
        let mut state = CacheState::default();
        state.subscribe(KEY);
        let seq = state.begin_fetch(KEY).unwrap();
        state.complete(KEY, seq, Ok(boxed(5)), 1.0);
        assert!(state.snapshot::<String>(KEY).data.is_none());
    }
}
