//! Headless screen tests: the component is driven through a `VirtualDom`
//! and observed with dioxus-ssr, with the simulated provider standing in
//! for the device. Signal contents are mirrored into a probe so the exact
//! pass-through serialization can be asserted without HTML escaping.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use dioxus_core::NoOpMutations;
use geowatch::screen::{start_tracking, GeoScreen, SharedGeolocator, TrackedWatch};
use geowatch_geolocation::{
    Coordinates, GeoError, Geolocator, Position, SimulatedGeolocator,
};

fn fix(latitude: f64, longitude: f64, timestamp: u64) -> Position {
    Position {
        coords: Coordinates {
            latitude,
            longitude,
            altitude: 0.0,
            accuracy: 5.0,
            heading: 0.0,
            speed: 0.0,
        },
        timestamp,
    }
}

/// Applies ready work until nothing more becomes ready within the grace
/// window, so spawned tasks and effects get a chance to run.
async fn settle(dom: &mut VirtualDom) {
    while tokio::time::timeout(Duration::from_millis(50), dom.wait_for_work())
        .await
        .is_ok()
    {
        dom.render_immediate(&mut NoOpMutations);
    }
}

/// Mirror of the screen's display state, shared with the test body.
#[derive(Clone, Default)]
struct StateProbe(Rc<RefCell<(String, String)>>);

impl StateProbe {
    fn snapshot(&self) -> (String, String) {
        self.0.borrow().clone()
    }
}

impl PartialEq for StateProbe {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[component]
fn RenderHarness(sim: SimulatedGeolocator) -> Element {
    use_context_provider(move || SharedGeolocator(Arc::new(sim)));
    rsx! {
        GeoScreen {}
    }
}

/// Rebuilds the screen's wiring with the trigger action run `triggers` times
/// on mount, mirroring presses of the "Get" control.
#[component]
fn TrackHarness(sim: SimulatedGeolocator, triggers: u32, probe: StateProbe) -> Element {
    let provider: Arc<dyn Geolocator> = Arc::new(sim);
    let initial_position = use_signal(|| String::from("unknown"));
    let last_position = use_signal(|| String::from("unknown"));
    let watch = {
        let provider = provider.clone();
        use_hook(move || Rc::new(RefCell::new(TrackedWatch::new(provider))))
    };

    use_effect(move || {
        for _ in 0..triggers {
            start_tracking(
                provider.clone(),
                initial_position,
                last_position,
                watch.clone(),
            );
        }
    });
    use_effect(move || {
        *probe.0.borrow_mut() = (initial_position(), last_position());
    });

    rsx! {
        "{initial_position}|{last_position}"
    }
}

#[test]
fn initial_render_shows_unknown_for_both_fields() {
    let sim = SimulatedGeolocator::new();
    let mut dom = VirtualDom::new_with_props(RenderHarness, RenderHarnessProps { sim });
    dom.rebuild_in_place();

    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Get"));
    assert!(html.contains("Initial position: "));
    assert!(html.contains("Current position: "));
    assert_eq!(html.matches("unknown").count(), 2);
}

#[tokio::test(start_paused = true)]
async fn fixes_flow_into_both_fields() {
    let sim = SimulatedGeolocator::new();
    let probe = StateProbe::default();
    let mut dom = VirtualDom::new_with_props(
        TrackHarness,
        TrackHarnessProps {
            sim: sim.clone(),
            triggers: 1,
            probe: probe.clone(),
        },
    );
    dom.rebuild_in_place();
    settle(&mut dom).await;

    let first = fix(1.0, 2.0, 1_000);
    sim.report_fix(first);
    settle(&mut dom).await;
    assert_eq!(probe.snapshot(), (first.to_json(), first.to_json()));

    // later watch updates overwrite the last position only
    let second = fix(3.0, 4.0, 2_000);
    let third = fix(5.0, 6.0, 3_000);
    sim.report_fix(second);
    sim.report_fix(third);
    settle(&mut dom).await;
    assert_eq!(probe.snapshot(), (first.to_json(), third.to_json()));
}

#[tokio::test(start_paused = true)]
async fn provider_errors_leave_the_display_unchanged() {
    let sim = SimulatedGeolocator::new();
    let probe = StateProbe::default();
    let mut dom = VirtualDom::new_with_props(
        TrackHarness,
        TrackHarnessProps {
            sim: sim.clone(),
            triggers: 1,
            probe: probe.clone(),
        },
    );
    dom.rebuild_in_place();
    settle(&mut dom).await;

    sim.report_error(GeoError::PositionUnavailable(String::from("gps disabled")));
    settle(&mut dom).await;
    assert_eq!(
        probe.snapshot(),
        (String::from("unknown"), String::from("unknown"))
    );

    // the one-shot request was consumed by the error; a later reading
    // reaches the watch only
    let late = fix(7.0, 8.0, 4_000);
    sim.report_fix(late);
    settle(&mut dom).await;
    assert_eq!(probe.snapshot(), (String::from("unknown"), late.to_json()));
}

#[tokio::test(start_paused = true)]
async fn teardown_clears_the_started_watch_exactly_once() {
    let sim = SimulatedGeolocator::new();
    let probe = StateProbe::default();
    let mut dom = VirtualDom::new_with_props(
        TrackHarness,
        TrackHarnessProps {
            sim: sim.clone(),
            triggers: 1,
            probe,
        },
    );
    dom.rebuild_in_place();
    settle(&mut dom).await;

    let started = sim.active_watches();
    assert_eq!(started.len(), 1);

    drop(dom);
    assert_eq!(sim.cleared_watches(), started);
}

#[tokio::test(start_paused = true)]
async fn teardown_without_a_watch_makes_no_cancellation_call() {
    let sim = SimulatedGeolocator::new();
    let probe = StateProbe::default();
    let mut dom = VirtualDom::new_with_props(
        TrackHarness,
        TrackHarnessProps {
            sim: sim.clone(),
            triggers: 0,
            probe,
        },
    );
    dom.rebuild_in_place();
    settle(&mut dom).await;

    drop(dom);
    assert!(sim.cleared_watches().is_empty());
    assert_eq!(sim.pending_requests(), 0);
}

#[tokio::test(start_paused = true)]
async fn retriggering_replaces_the_active_watch() {
    let sim = SimulatedGeolocator::new();
    let probe = StateProbe::default();
    let mut dom = VirtualDom::new_with_props(
        TrackHarness,
        TrackHarnessProps {
            sim: sim.clone(),
            triggers: 2,
            probe: probe.clone(),
        },
    );
    dom.rebuild_in_place();
    settle(&mut dom).await;

    // the first watch was cleared before the second was started
    assert_eq!(sim.active_watches().len(), 1);
    assert_eq!(sim.cleared_watches().len(), 1);
    assert_ne!(sim.cleared_watches(), sim.active_watches());

    // updates still flow to the surviving watch
    let reading = fix(1.0, 2.0, 1_000);
    sim.report_fix(reading);
    settle(&mut dom).await;
    assert_eq!(probe.snapshot().1, reading.to_json());

    drop(dom);
    assert_eq!(sim.cleared_watches().len(), 2);
}
