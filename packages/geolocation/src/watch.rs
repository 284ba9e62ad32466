use std::sync::Arc;

use crate::{Geolocator, WatchId};

/// Owns at most one active watch registration.
///
/// Registering a new watch clears the previous one first, and dropping the
/// guard clears whatever is still active, so a screen can never leak a
/// subscription across re-triggers or teardown.
pub struct WatchGuard {
    provider: Arc<dyn Geolocator>,
    active: Option<WatchId>,
}

impl WatchGuard {
    pub fn new(provider: Arc<dyn Geolocator>) -> Self {
        Self {
            provider,
            active: None,
        }
    }

    /// The currently registered watch, if any.
    pub fn active(&self) -> Option<WatchId> {
        self.active
    }

    /// Registers `id` as the active watch, clearing any previous
    /// registration first.
    pub fn replace(&mut self, id: WatchId) {
        self.clear();
        self.active = Some(id);
    }

    /// Clears the active watch, if any. Repeated calls are a no-op.
    pub fn clear(&mut self) {
        if let Some(id) = self.active.take() {
            self.provider.clear_watch(id);
        }
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.clear();
    }
}
