//! Location provider contract for the geowatch sample.
//!
//! The API mirrors the classic callback-based geolocation surface (a
//! one-shot position fetch, a continuous position watch, and an explicit
//! cancellation call) rendered Rust-side as channels: the one-shot fetch
//! completes on a single-fire [`oneshot`](futures_channel::oneshot) channel
//! carrying a tagged success-or-failure value, and a watch delivers updates
//! on an unbounded channel until its handle is cleared.
//!
//! The view layer never inspects position or error payloads; it serializes
//! them whole for display. [`SimulatedGeolocator`] is a deterministic
//! in-process provider standing in for the platform location service.

mod error;
mod models;
mod simulated;
mod watch;

use futures_channel::{mpsc, oneshot};

pub use error::GeoError;
pub use models::{Coordinates, Position, PositionOptions};
pub use simulated::SimulatedGeolocator;
pub use watch::WatchGuard;

/// Opaque handle for an active watch subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

impl WatchId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Outcome of a single position delivery.
pub type PositionResult = Result<Position, GeoError>;

/// Completion channel for a one-shot fix request. Fires at most once; if the
/// provider drops the request, the receiver resolves to
/// [`Canceled`](futures_channel::oneshot::Canceled).
pub type FixReceiver = oneshot::Receiver<PositionResult>;

/// Update channel for an active watch. Ends when the watch is cleared.
pub type WatchUpdates = mpsc::UnboundedReceiver<PositionResult>;

/// A source of device positions.
pub trait Geolocator: Send + Sync + 'static {
    /// Requests a single position fix.
    ///
    /// Returns immediately; the result arrives later on the receiver. A
    /// provider may resolve the request from a cached fix that is younger
    /// than [`PositionOptions::maximum_age`], and should fail it with
    /// [`GeoError::Timeout`] once [`PositionOptions::timeout`] has passed.
    fn current_position(&self, options: PositionOptions) -> FixReceiver;

    /// Starts a continuous watch, delivering a tagged result for every new
    /// reading until the returned handle is passed to
    /// [`clear_watch`](Geolocator::clear_watch).
    fn watch_position(&self, options: PositionOptions) -> (WatchId, WatchUpdates);

    /// Cancels a watch. Unknown or already-cleared handles are a no-op.
    fn clear_watch(&self, id: WatchId);
}
