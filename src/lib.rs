pub mod components;
pub mod geo;
pub mod plugins;
pub mod resources;
pub mod systems;

mod computer;

pub use components::{
    CdiScale, FlightPlan, HoldDefinition, HoldEntry, MapLayers, MapOrientation, NavSource,
    NavigationSnapshot, RadioSignal, TelemetryFrame, TelemetrySample, TerrainAlert, ToFrom,
    TrafficTarget, TurnDirection, Waypoint, WaypointKind,
};
pub use computer::NavigationComputer;
pub use plugins::{MapDisplayPlugin, NavSet, NavigationCorePlugin, WaypointSequenced};
pub use resources::{MapDisplaySettings, NavConfig, NavError, Result, RunwayInfo};
