use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use futures_util::StreamExt;
use geowatch_geolocation::{Geolocator, PositionOptions, WatchGuard, WatchId};

use crate::dialog;

/// Options used for both the one-shot fetch and the watch: high accuracy, a
/// 20 s timeout, and an 11 s cache window.
pub const FIX_OPTIONS: PositionOptions = PositionOptions {
    enable_high_accuracy: true,
    timeout: Some(Duration::from_millis(20_000)),
    maximum_age: Some(Duration::from_millis(11_000)),
};

/// The location provider handed to [`GeoScreen`] through context.
#[derive(Clone)]
pub struct SharedGeolocator(pub Arc<dyn Geolocator>);

/// Watch registration owned by one screen instance: the provider-side guard
/// plus the task consuming the update stream.
///
/// The consuming task is cancelled here only when a new watch replaces it;
/// on unmount it dies with its scope, and the guard's drop clears the
/// provider-side registration.
pub struct TrackedWatch {
    guard: WatchGuard,
    task: Option<Task>,
}

impl TrackedWatch {
    pub fn new(provider: Arc<dyn Geolocator>) -> Self {
        Self {
            guard: WatchGuard::new(provider),
            task: None,
        }
    }

    /// Stops the active watch, if any: cancels the consuming task and clears
    /// the provider-side registration.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
        self.guard.clear();
    }

    fn track(&mut self, id: WatchId, task: Task) {
        self.guard.replace(id);
        self.task = Some(task);
    }
}

/// Requests a one-shot fix and (re)starts the position watch: the screen's
/// "Get" action. Any previously active watch is stopped first, so a screen
/// owns at most one subscription at a time.
///
/// Successful deliveries overwrite the matching display signal with the
/// payload's JSON; failures are shown in an alert dialog once and leave the
/// display untouched.
pub fn start_tracking(
    provider: Arc<dyn Geolocator>,
    mut initial_position: Signal<String>,
    mut last_position: Signal<String>,
    watch: Rc<RefCell<TrackedWatch>>,
) {
    let fetch = provider.current_position(FIX_OPTIONS);
    spawn(async move {
        match fetch.await {
            Ok(Ok(position)) => initial_position.set(position.to_json()),
            Ok(Err(error)) => dialog::alert(&error.to_json()).await,
            // The provider went away with the request in flight; there is
            // nothing to show.
            Err(_cancelled) => {}
        }
    });

    watch.borrow_mut().stop();
    let (id, mut updates) = provider.watch_position(FIX_OPTIONS);
    let task = spawn(async move {
        while let Some(update) = updates.next().await {
            match update {
                Ok(position) => last_position.set(position.to_json()),
                Err(error) => dialog::alert(&error.to_json()).await,
            }
        }
    });
    watch.borrow_mut().track(id, task);
}

/// The sample screen: a "Get" control above the first fix and the most
/// recent watch update.
#[component]
pub fn GeoScreen() -> Element {
    let provider = use_context::<SharedGeolocator>().0;
    let initial_position = use_signal(|| String::from("unknown"));
    let last_position = use_signal(|| String::from("unknown"));
    let watch = {
        let provider = provider.clone();
        use_hook(move || Rc::new(RefCell::new(TrackedWatch::new(provider))))
    };

    rsx! {
        div {
            button {
                onclick: move |_| {
                    start_tracking(
                        provider.clone(),
                        initial_position,
                        last_position,
                        watch.clone(),
                    )
                },
                "Get"
            }
            p {
                span { style: "font-weight: 500", "Initial position: " }
                "{initial_position}"
            }
            p {
                span { style: "font-weight: 500", "Current position: " }
                "{last_position}"
            }
        }
    }
}
