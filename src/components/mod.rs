pub mod cdi;
pub mod flight_plan;
pub mod hold;
pub mod map;
pub mod snapshot;
pub mod telemetry;
pub mod waypoint;

pub use cdi::{CdiScale, CdiState, GpsData, NavRadioData, NavRadios, NavSource, ToFrom};
pub use flight_plan::{ActiveLeg, DirectTo, FlightPlan};
pub use hold::{HoldDefinition, HoldEntry, HoldFix, HoldLeg, ObsState, TurnDirection};
pub use map::{
    MapComputed, MapLayers, MapOrientation, MapState, RunwayExtension, TerrainAlert, TrackVector,
};
pub use snapshot::{LegSummary, MapDecisions, NavigationSnapshot, TrafficGeometry};
pub use telemetry::{RadioSignal, TelemetryFrame, TelemetrySample, TrafficTarget};
pub use waypoint::{Waypoint, WaypointKind};
