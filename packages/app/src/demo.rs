use std::time::{Duration, SystemTime, UNIX_EPOCH};

use geowatch_geolocation::{Coordinates, Position, SimulatedGeolocator};

const BASE_LATITUDE: f64 = 52.5200;
const BASE_LONGITUDE: f64 = 13.4050;
const REPORT_INTERVAL: Duration = Duration::from_secs(2);

/// Feeds the simulated provider with a slow drift around a fixed base
/// coordinate, standing in for the device's location sensor in the demo
/// binary.
pub async fn drive(provider: SimulatedGeolocator) {
    let mut timer = tokio::time::interval(REPORT_INTERVAL);
    let mut tick: u64 = 0;
    loop {
        timer.tick().await;
        provider.report_fix(wandering_fix(tick, epoch_millis()));
        tick += 1;
    }
}

fn wandering_fix(tick: u64, timestamp: u64) -> Position {
    let phase = tick as f64 / 10.0;
    Position {
        coords: Coordinates {
            latitude: BASE_LATITUDE + phase.sin() * 1e-3,
            longitude: BASE_LONGITUDE + phase.cos() * 1e-3,
            altitude: 34.0,
            accuracy: 5.0,
            heading: (tick % 360) as f64,
            speed: 1.4,
        },
        timestamp,
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
