use bevy::prelude::*;

use crate::components::{
    CdiState, FlightPlan, GpsData, MapComputed, MapState, NavRadios, ObsState,
};
use crate::resources::{
    DestinationRunway, LatestSnapshot, MapDisplaySettings, NavConfig, RunwayExtensionCache,
    TelemetryBuffer,
};
use crate::plugins::WaypointSequenced;
use crate::systems::{
    holding_pattern_system, navigation_resolver_system, snapshot_system,
    waypoint_sequencing_system,
};

/// Tick pipeline stages, chained so every tick observes the same order:
/// sequencing, then hold bookkeeping, then source resolution, then map
/// decisions, then snapshot assembly.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavSet {
    Sequence,
    Hold,
    Resolve,
    Map,
    Snapshot,
}

/// Core navigation pipeline: resources, the sequencing/holding/resolver/
/// snapshot systems, and the navigator entity itself.
pub struct NavigationCorePlugin {
    config: NavConfig,
}

impl NavigationCorePlugin {
    pub fn new() -> Self {
        Self {
            config: NavConfig::default(),
        }
    }

    pub fn with_config(config: NavConfig) -> Self {
        Self { config }
    }
}

impl Default for NavigationCorePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for NavigationCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<MapDisplaySettings>()
            .init_resource::<TelemetryBuffer>()
            .init_resource::<DestinationRunway>()
            .init_resource::<RunwayExtensionCache>()
            .init_resource::<LatestSnapshot>()
            .add_event::<WaypointSequenced>()
            .configure_sets(
                Update,
                (
                    NavSet::Sequence,
                    NavSet::Hold,
                    NavSet::Resolve,
                    NavSet::Map,
                    NavSet::Snapshot,
                )
                    .chain(),
            )
            .add_systems(Startup, spawn_navigator)
            .add_systems(
                Update,
                (
                    waypoint_sequencing_system.in_set(NavSet::Sequence),
                    holding_pattern_system.in_set(NavSet::Hold),
                    navigation_resolver_system.in_set(NavSet::Resolve),
                    snapshot_system.in_set(NavSet::Snapshot),
                ),
            );
    }
}

/// Spawns the single navigator entity this instance serves, with display
/// state seeded from the settings resource.
fn spawn_navigator(mut commands: Commands, settings: Res<MapDisplaySettings>) {
    let mut map = MapState::new(
        settings.ranges_nm.clone(),
        settings.initial_range_nm,
        settings.orientation,
    );
    map.layers = settings.layers;

    commands.spawn((
        FlightPlan::default(),
        CdiState::default(),
        GpsData::default(),
        NavRadios::default(),
        ObsState::default(),
        map,
        MapComputed::default(),
    ));
    info!("Navigator spawned");
}
