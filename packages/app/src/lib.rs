//! geowatch: a sample screen that requests and displays device location.
//!
//! The screen mirrors the classic mobile geolocation demo: one "Get"
//! control, a row for the first fix and a row for the most recent watch
//! update, both starting at `"unknown"`. Position and error payloads are
//! passed through as the provider serialized them, never inspected.

pub mod demo;
pub mod dialog;
pub mod screen;

pub use screen::{GeoScreen, SharedGeolocator};
