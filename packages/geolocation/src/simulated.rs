use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use futures_channel::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::debug;

use crate::{
    FixReceiver, GeoError, Geolocator, Position, PositionOptions, PositionResult, WatchId,
    WatchUpdates,
};

/// Deterministic in-process location provider.
///
/// Stands in for the platform location service: the demo feed and tests push
/// readings in with [`report_fix`](SimulatedGeolocator::report_fix) /
/// [`report_error`](SimulatedGeolocator::report_error), and the provider
/// applies the usual device semantics on top: a one-shot request is answered
/// from the cached fix while it is younger than `maximum_age`, parks until
/// the next reading otherwise, and fails with [`GeoError::Timeout`] once its
/// `timeout` passes.
///
/// Handles are cheap clones of the same provider.
#[derive(Clone, Default)]
pub struct SimulatedGeolocator {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    last_fix: Option<CachedFix>,
    pending: Vec<PendingRequest>,
    watchers: Vec<Watcher>,
    cleared: Vec<WatchId>,
    next_watch: u64,
    next_request: u64,
}

struct CachedFix {
    position: Position,
    reported_at: Instant,
}

struct PendingRequest {
    id: u64,
    sender: oneshot::Sender<PositionResult>,
}

struct Watcher {
    id: WatchId,
    sender: mpsc::UnboundedSender<PositionResult>,
}

impl SimulatedGeolocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers a reading: resolves every pending one-shot request, updates
    /// every active watch, and refreshes the cached fix.
    pub fn report_fix(&self, position: Position) {
        let mut inner = self.lock();
        inner.last_fix = Some(CachedFix {
            position,
            reported_at: Instant::now(),
        });
        for request in inner.pending.drain(..) {
            let _ = request.sender.send(Ok(position));
        }
        for watcher in &inner.watchers {
            let _ = watcher.sender.unbounded_send(Ok(position));
        }
        debug!(watchers = inner.watchers.len(), "reported fix");
    }

    /// Delivers a failure to every pending request and active watch. The
    /// cached fix is left untouched.
    pub fn report_error(&self, error: GeoError) {
        let mut inner = self.lock();
        for request in inner.pending.drain(..) {
            let _ = request.sender.send(Err(error.clone()));
        }
        for watcher in &inner.watchers {
            let _ = watcher.sender.unbounded_send(Err(error.clone()));
        }
        debug!(watchers = inner.watchers.len(), %error, "reported error");
    }

    /// Seeds the fix cache without notifying anyone, as if an earlier
    /// reading were still held by the device.
    pub fn prime_fix(&self, position: Position) {
        self.lock().last_fix = Some(CachedFix {
            position,
            reported_at: Instant::now(),
        });
    }

    /// Ids of the watches currently registered.
    pub fn active_watches(&self) -> Vec<WatchId> {
        self.lock().watchers.iter().map(|watcher| watcher.id).collect()
    }

    /// Every id passed to [`clear_watch`](Geolocator::clear_watch), in call
    /// order.
    pub fn cleared_watches(&self) -> Vec<WatchId> {
        self.lock().cleared.clone()
    }

    /// Number of one-shot requests still waiting for a reading.
    pub fn pending_requests(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expire(state: &Weak<Mutex<Inner>>, request: u64) {
        let Some(state) = state.upgrade() else {
            return;
        };
        let mut inner = state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = inner.pending.iter().position(|pending| pending.id == request) {
            let pending = inner.pending.swap_remove(index);
            let _ = pending.sender.send(Err(GeoError::Timeout));
            debug!(request, "one-shot request timed out");
        }
    }
}

/// Handles to the same simulator compare equal.
impl PartialEq for SimulatedGeolocator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Inner {
    fn fresh_fix(&self, maximum_age: Option<Duration>) -> Option<Position> {
        let cached = self.last_fix.as_ref()?;
        match maximum_age {
            Some(age) if cached.reported_at.elapsed() > age => None,
            _ => Some(cached.position),
        }
    }
}

impl Geolocator for SimulatedGeolocator {
    fn current_position(&self, options: PositionOptions) -> FixReceiver {
        let (sender, receiver) = oneshot::channel();
        let mut inner = self.lock();
        if let Some(position) = inner.fresh_fix(options.maximum_age) {
            let _ = sender.send(Ok(position));
            return receiver;
        }
        inner.next_request += 1;
        let request = inner.next_request;
        inner.pending.push(PendingRequest { id: request, sender });
        drop(inner);

        // Timeout enforcement needs a timer; without a runtime the request
        // simply waits for the next reading.
        if let Some(timeout) = options.timeout {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let state = Arc::downgrade(&self.inner);
                handle.spawn(async move {
                    tokio::time::sleep(timeout).await;
                    Self::expire(&state, request);
                });
            }
        }
        receiver
    }

    fn watch_position(&self, options: PositionOptions) -> (WatchId, WatchUpdates) {
        let (sender, receiver) = mpsc::unbounded();
        let mut inner = self.lock();
        inner.next_watch += 1;
        let id = WatchId::new(inner.next_watch);
        inner.watchers.push(Watcher { id, sender });
        debug!(
            ?id,
            high_accuracy = options.enable_high_accuracy,
            "watch registered"
        );
        (id, receiver)
    }

    fn clear_watch(&self, id: WatchId) {
        let mut inner = self.lock();
        inner.cleared.push(id);
        inner.watchers.retain(|watcher| watcher.id != id);
        debug!(?id, "watch cleared");
    }
}
