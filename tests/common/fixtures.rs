use chrono::{DateTime, Duration, TimeZone, Utc};
use navcore::{
    HoldDefinition, NavigationComputer, TelemetryFrame, TelemetrySample, TurnDirection, Waypoint,
};

/// Fixed epoch so test flights have deterministic timestamps.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// A northbound cruise sample at the fixed epoch: 120 kt over the ground,
/// track and heading 000, no magnetic variation, valid fix.
pub fn sample_at(lat: f64, lon: f64) -> TelemetrySample {
    TelemetrySample {
        lat,
        lon,
        ground_speed_kt: 120.0,
        heading_deg: 0.0,
        magnetic_heading_deg: 0.0,
        track_deg: 0.0,
        magnetic_variation_deg: 0.0,
        altitude_ft: 5000.0,
        fix_valid: true,
        timestamp: start_time(),
    }
}

/// The same sample `seconds` after the epoch.
pub fn sample_at_time(lat: f64, lon: f64, seconds: i64) -> TelemetrySample {
    let mut sample = sample_at(lat, lon);
    sample.timestamp = start_time() + Duration::seconds(seconds);
    sample
}

pub fn frame_at(lat: f64, lon: f64) -> TelemetryFrame {
    TelemetryFrame::new(sample_at(lat, lon))
}

pub fn frame_at_time(lat: f64, lon: f64, seconds: i64) -> TelemetryFrame {
    TelemetryFrame::new(sample_at_time(lat, lon, seconds))
}

/// Three fixes due north along 122.3 W, 30 nm legs.
pub fn northbound_route() -> Vec<Waypoint> {
    vec![
        Waypoint::new("ALPHA", 47.0, -122.3),
        Waypoint::new("BRAVO", 47.5, -122.3),
        Waypoint::new("CHRLY", 48.0, -122.3),
    ]
}

/// The northbound route with a standard right-turn hold published at
/// BRAVO, inbound course 360.
pub fn route_with_hold_at_bravo() -> Vec<Waypoint> {
    vec![
        Waypoint::new("ALPHA", 47.0, -122.3),
        Waypoint::new("BRAVO", 47.5, -122.3)
            .with_hold(HoldDefinition::new(360.0, TurnDirection::Right)),
        Waypoint::new("CHRLY", 48.0, -122.3),
    ]
}

/// A computer with the northbound route loaded, before any telemetry.
pub fn computer_on_route() -> NavigationComputer {
    let mut computer = NavigationComputer::new();
    computer
        .set_flight_plan(northbound_route())
        .expect("route is valid");
    computer
}
