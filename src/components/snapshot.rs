use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::components::cdi::{CdiState, GpsData, NavRadioData};
use crate::components::hold::ObsState;
use crate::components::map::{MapLayers, MapOrientation, RunwayExtension, TerrainAlert, TrackVector};

/// Summary of the active leg for the widget's data bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegSummary {
    /// Identifier of the waypoint being flown to
    pub to_ident: String,
    /// Direct distance to the active waypoint [nm]
    pub distance_nm: f64,
    /// Bearing to the active waypoint [deg]
    pub bearing_deg: f64,
    /// Desired track along the leg [deg]
    pub desired_track_deg: f64,
    /// Estimated time en route to the active waypoint [s]; absent below the
    /// ETE floor speed
    pub ete_s: Option<f64>,
    /// Estimated time of arrival at the active waypoint
    pub eta: Option<DateTime<Utc>>,
    /// Distance to the destination along the remaining legs [nm]
    pub destination_distance_nm: f64,
}

/// Relative geometry of one traffic target, computed from ownship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficGeometry {
    pub ident: String,
    /// Bearing from ownship, relative to ownship track [deg], (-180, 180]
    pub relative_bearing_deg: f64,
    pub range_nm: f64,
    /// Target altitude minus ownship altitude [ft]
    pub altitude_delta_ft: f64,
    /// Range closure rate [kt], positive = converging
    pub closing_kt: f64,
}

/// Map decisions for the renderer: what the map systems chose this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDecisions {
    pub range_nm: f64,
    pub orientation: MapOrientation,
    pub layers: MapLayers,
    pub auto_zoom_overridden: bool,
    pub track_vector: Option<TrackVector>,
    pub runway_extension: Option<RunwayExtension>,
    pub terrain_alert: TerrainAlert,
}

impl Default for MapDecisions {
    fn default() -> Self {
        Self {
            range_nm: 10.0,
            orientation: MapOrientation::NorthUp,
            layers: MapLayers::default(),
            auto_zoom_overridden: false,
            track_vector: None,
            runway_extension: None,
            terrain_alert: TerrainAlert::Clear,
        }
    }
}

/// Complete navigation state handed to the rendering collaborator after
/// each tick. Plain immutable data; the renderer never reaches back into
/// the computer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    /// Timestamp of the telemetry sample this snapshot was computed from
    pub timestamp: Option<DateTime<Utc>>,
    pub cdi: CdiState,
    pub gps: GpsData,
    pub nav1: NavRadioData,
    pub nav2: NavRadioData,
    pub obs: ObsState,
    pub map: MapDecisions,
    pub leg: Option<LegSummary>,
    pub traffic: Vec<TrafficGeometry>,
}
