use serde::{Deserialize, Serialize};

use crate::components::hold::HoldDefinition;

/// Category of a navigation fix, as reported by the navigation database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaypointKind {
    Airport,
    Vor,
    Ndb,
    Fix,
    User,
}

impl Default for WaypointKind {
    fn default() -> Self {
        WaypointKind::Fix
    }
}

/// A single fix in a flight plan.
///
/// Waypoints are immutable once placed in a plan, except for the `passed`
/// flag which is set by the sequencing system when the aircraft crosses the
/// fix, and `leg_distance_nm` which the plan recomputes on edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Unique identifier, e.g. "KSEA" or "OLM"
    pub ident: String,
    /// Optional human-readable name
    pub name: Option<String>,
    /// Latitude [deg]
    pub lat: f64,
    /// Longitude [deg]
    pub lon: f64,
    /// Optional altitude constraint [ft MSL]
    pub altitude_ft: Option<f64>,
    pub kind: WaypointKind,
    /// Distance from the previous waypoint in the plan [nm]
    pub leg_distance_nm: Option<f64>,
    /// Set by sequencing once the aircraft has crossed this fix
    pub passed: bool,
    /// Optional published hold at this fix
    pub hold: Option<HoldDefinition>,
}

impl Waypoint {
    /// Create a bare fix at a position
    pub fn new(ident: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            ident: ident.into(),
            name: None,
            lat,
            lon,
            altitude_ft: None,
            kind: WaypointKind::Fix,
            leg_distance_nm: None,
            passed: false,
            hold: None,
        }
    }

    pub fn with_kind(mut self, kind: WaypointKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_altitude(mut self, altitude_ft: f64) -> Self {
        self.altitude_ft = Some(altitude_ft);
        self
    }

    pub fn with_hold(mut self, hold: HoldDefinition) -> Self {
        self.hold = Some(hold);
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}
