use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Coordinate record attached to every fix, matching what platform location
/// services report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above the reference ellipsoid.
    pub altitude: f64,
    /// Radius of the confidence circle, in meters.
    pub accuracy: f64,
    /// Direction of travel in degrees clockwise from north.
    pub heading: f64,
    /// Ground speed in meters per second.
    pub speed: f64,
}

/// A single position fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub coords: Coordinates,
    /// Epoch milliseconds at which the fix was taken.
    pub timestamp: u64,
}

impl Position {
    /// The JSON form shown to the user. The view passes this through without
    /// inspecting individual fields, so the serialization here is the wire
    /// contract for display.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("null"))
    }
}

/// Options recognized by both the one-shot fetch and the watch.
///
/// `None` means unbounded, matching the platform defaults: any cached fix is
/// acceptable, and a request waits indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Option<Duration>,
    pub maximum_age: Option<Duration>,
}
