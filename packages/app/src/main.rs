use std::sync::Arc;

use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use geowatch::screen::SharedGeolocator;
use geowatch::{demo, GeoScreen};
use geowatch_geolocation::SimulatedGeolocator;

fn app() -> Element {
    let feed = use_hook(SimulatedGeolocator::new);
    {
        let feed = feed.clone();
        use_context_provider(move || SharedGeolocator(Arc::new(feed)));
    }
    use_future(move || demo::drive(feed.clone()));

    rsx! {
        GeoScreen {}
    }
}

#[cfg(any(feature = "desktop", feature = "mobile"))]
fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to initialize logger");
    dioxus::launch(app);
}

// Without a renderer feature there is no window to open; render one frame of
// the screen so `cargo run` still shows the markup.
#[cfg(not(any(feature = "desktop", feature = "mobile")))]
fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to initialize logger");
    let mut dom = VirtualDom::new(app);
    dom.rebuild_in_place();
    println!("{}", dioxus_ssr::render(&dom));
    println!("(build with `--features desktop` or `--features mobile` for the interactive app)");
}
