use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::components::cdi::ToFrom;
use crate::components::map::TerrainAlert;

/// One aircraft state sample from the simulator feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub lat: f64,
    pub lon: f64,
    /// Ground speed [kt]
    pub ground_speed_kt: f64,
    /// True heading [deg]
    pub heading_deg: f64,
    /// Magnetic heading [deg]
    pub magnetic_heading_deg: f64,
    /// Track over the ground [deg true]
    pub track_deg: f64,
    /// Magnetic variation [deg], positive east (magnetic = true - variation)
    pub magnetic_variation_deg: f64,
    /// Indicated altitude [ft MSL]
    pub altitude_ft: f64,
    /// False when the position source has no usable fix
    pub fix_valid: bool,
    pub timestamp: DateTime<Utc>,
}

impl TelemetrySample {
    pub fn position(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    /// Converts a true course to magnetic using this sample's variation.
    pub fn to_magnetic_deg(&self, true_deg: f64) -> f64 {
        crate::geo::wrap_360(true_deg - self.magnetic_variation_deg)
    }

    /// Converts a magnetic course (e.g. a pilot-selected OBS course) back to
    /// true for geometry.
    pub fn to_true_deg(&self, magnetic_deg: f64) -> f64 {
        crate::geo::wrap_360(magnetic_deg + self.magnetic_variation_deg)
    }
}

/// Raw state of one NAV receiver as supplied by the external radio model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadioSignal {
    /// Needle deflection from the receiver, already course-referenced
    pub deflection: i32,
    /// Course selected on the radio's OBS card [deg]
    pub obs_course_deg: f64,
    /// Radial FROM the station the aircraft sits on [deg]
    pub from_radial_deg: f64,
    pub to_from: ToFrom,
    /// Received signal strength, 0..=100 [%]
    pub signal_strength_pct: f64,
    pub glideslope: i32,
    pub glideslope_invalid: bool,
    pub dme_nm: Option<f64>,
    pub station_ident: Option<String>,
}

/// A traffic target reported by the telemetry collaborator. Read-only for
/// the core; only position/velocity fields are consumed, to compute
/// relative geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficTarget {
    pub ident: String,
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: f64,
    pub ground_speed_kt: f64,
    pub track_deg: f64,
}

/// Everything the navigator consumes in one tick: the aircraft sample plus
/// the collaborator feeds that arrive alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub sample: TelemetrySample,
    pub nav1: Option<RadioSignal>,
    pub nav2: Option<RadioSignal>,
    pub traffic: Vec<TrafficTarget>,
    pub terrain_alert: TerrainAlert,
}

impl TelemetryFrame {
    pub fn new(sample: TelemetrySample) -> Self {
        Self {
            sample,
            nav1: None,
            nav2: None,
            traffic: Vec::new(),
            terrain_alert: TerrainAlert::Clear,
        }
    }
}
