//! Live-refreshing ranked lists (latest blocks, latest transactions).
//!
//! [`LiveList`] is the state a widget renders: the current rows, which of them
//! just appeared, and transient refresh flags. It only changes through
//! [`LiveList::begin_refresh`], [`LiveList::apply_success`] and
//! [`LiveList::apply_failure`].
//!
//! [`Poller`] owns the background task that fetches fresh rows on a fixed
//! cadence. A cycle's fetch is awaited before the next tick is taken, so
//! results always arrive in the order the fetches started.

use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A row with a stable natural key (block number, transaction hash)
pub trait Ranked {
    fn key(&self) -> &str;
}

/// Keys of `items` that are not in `previous`
pub fn diff_keys<T: Ranked>(previous: &HashSet<String>, items: &[T]) -> HashSet<String> {
    items
        .iter()
        .map(Ranked::key)
        .filter(|key| !previous.contains(*key))
        .map(str::to_string)
        .collect()
}

fn key_set<T: Ranked>(items: &[T]) -> HashSet<String> {
    items.iter().map(|item| item.key().to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveWindows {
    /// How long new rows stay highlighted
    pub highlight: Duration,
    /// How long the "refresh failed" flag stays up
    pub failure: Duration,
}

impl Default for LiveWindows {
    fn default() -> Self {
        Self {
            highlight: Duration::from_secs(3),
            failure: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiveList<T> {
    items: Vec<T>,
    previous_keys: HashSet<String>,
    new_keys: HashSet<String>,
    new_until: Option<Instant>,
    refreshing: bool,
    failed_until: Option<Instant>,
    windows: LiveWindows,
}

impl<T: Ranked> LiveList<T> {
    /// Start from a seed snapshot; its keys count as already seen.
    pub fn new(seed: Vec<T>, windows: LiveWindows) -> Self {
        Self {
            previous_keys: key_set(&seed),
            items: seed,
            new_keys: HashSet::new(),
            new_until: None,
            refreshing: false,
            failed_until: None,
            windows,
        }
    }

    /// A poll cycle started. Any highlight from the last cycle ends here.
    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
        self.clear_new();
    }

    /// Replace the rows with a fresh fetch and mark the keys that were absent
    /// from the previous one. Returns the number of new keys.
    pub fn apply_success(&mut self, items: Vec<T>, now: Instant) -> usize {
        let new_keys = diff_keys(&self.previous_keys, &items);

        self.previous_keys = key_set(&items);
        self.items = items;
        self.refreshing = false;
        self.failed_until = None;

        let count = new_keys.len();
        if count > 0 {
            self.new_keys = new_keys;
            self.new_until = Some(now + self.windows.highlight);
        } else {
            self.clear_new();
        }
        count
    }

    /// Keep the last good rows and raise the transient failure flag.
    pub fn apply_failure(&mut self, now: Instant) {
        self.refreshing = false;
        self.failed_until = Some(now + self.windows.failure);
    }

    /// Drop flags whose display window has passed
    pub fn expire(&mut self, now: Instant) {
        if self.new_until.is_some_and(|until| now >= until) {
            self.clear_new();
        }
        if self.failed_until.is_some_and(|until| now >= until) {
            self.failed_until = None;
        }
    }

    fn clear_new(&mut self) {
        self.new_keys.clear();
        self.new_until = None;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn new_keys(&self) -> &HashSet<String> {
        &self.new_keys
    }

    pub fn is_new(&self, key: &str) -> bool {
        self.new_keys.contains(key)
    }

    pub fn previous_keys(&self) -> &HashSet<String> {
        &self.previous_keys
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn refresh_failed(&self) -> bool {
        self.failed_until.is_some()
    }
}

/// What a poll cycle reports back to the view
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent<T> {
    Started,
    Fetched(Vec<T>),
    Failed(String),
}

impl<T: Ranked> LiveList<T> {
    /// Apply one poller event. Returns the number of new keys for `Fetched`.
    pub fn apply(&mut self, event: LiveEvent<T>, now: Instant) -> usize {
        match event {
            LiveEvent::Started => {
                self.begin_refresh();
                0
            }
            LiveEvent::Fetched(items) => self.apply_success(items, now),
            LiveEvent::Failed(_) => {
                self.apply_failure(now);
                0
            }
        }
    }
}

/// Background refresh task for one widget.
///
/// Dropping the poller aborts the task; [`Poller::dispose`] does so explicitly.
#[derive(Debug)]
pub struct Poller {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn the refresh loop. The first fetch happens one `period` after the
    /// spawn. `wrap` lifts a [`LiveEvent`] into the channel's message type.
    pub fn spawn<T, M, E, F, Fut>(
        name: &'static str,
        period: Duration,
        fetch: F,
        tx: mpsc::Sender<M>,
        wrap: fn(LiveEvent<T>) -> M,
    ) -> Self
    where
        T: Send + 'static,
        M: Send + 'static,
        E: Display + Send + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if tx.send(wrap(LiveEvent::Started)).await.is_err() {
                    break;
                }

                let event = match fetch().await {
                    Ok(items) => {
                        tracing::debug!(poller = name, rows = items.len(), "Refreshed");
                        LiveEvent::Fetched(items)
                    }
                    Err(e) => {
                        tracing::warn!(poller = name, error = %e, "Refresh failed");
                        LiveEvent::Failed(e.to_string())
                    }
                };

                if tx.send(wrap(event)).await.is_err() {
                    break;
                }
            }

            tracing::debug!(poller = name, "Poller stopped");
        });

        tracing::info!(poller = name, ?period, "Poller started");
        Self { name, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the refresh loop. Consumes the poller, so it cannot run twice.
    pub fn dispose(self) {
        tracing::info!(poller = self.name, "Poller disposed");
        // Drop aborts the task
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
