use bevy::prelude::*;

use crate::components::cdi::{CdiState, GpsData, NavSource};
use crate::components::flight_plan::FlightPlan;
use crate::components::hold::{HoldDefinition, HoldFix, ObsState};
use crate::components::map::{MapLayers, MapOrientation, MapState};
use crate::components::snapshot::NavigationSnapshot;
use crate::components::telemetry::TelemetryFrame;
use crate::components::waypoint::Waypoint;
use crate::geo;
use crate::plugins::{MapDisplayPlugin, NavigationCorePlugin};
use crate::resources::{
    DestinationRunway, LatestSnapshot, MapDisplaySettings, NavConfig, Result, RunwayInfo,
    TelemetryBuffer,
};

/// The navigation computer façade: one instance serves one widget/aircraft
/// context.
///
/// Internally this owns a headless app whose schedule is stepped once per
/// [`NavigationComputer::tick`]; commands are synchronous mutations of the
/// same state and must be serialized with `tick` by the embedding event
/// loop. The computer spawns no threads and performs no I/O.
pub struct NavigationComputer {
    app: App,
}

impl NavigationComputer {
    /// Builds a computer with default configuration and display settings.
    pub fn new() -> Self {
        Self::build(NavConfig::default(), MapDisplaySettings::default())
    }

    /// Builds a computer with explicit configuration, rejecting invalid
    /// display settings (inverted zoom bounds, off-list initial range).
    pub fn with_settings(config: NavConfig, settings: MapDisplaySettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(config, settings))
    }

    fn build(config: NavConfig, settings: MapDisplaySettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(settings);
        app.add_plugins((NavigationCorePlugin::with_config(config), MapDisplayPlugin));
        // First update runs the startup systems so the navigator entity
        // exists before any command arrives.
        app.update();
        Self { app }
    }

    /// Advances the computer by one telemetry sample and returns the
    /// snapshot for the renderer. Never fails: degraded conditions (signal
    /// loss, empty plan) surface as flags inside the snapshot.
    pub fn tick(&mut self, frame: TelemetryFrame) -> NavigationSnapshot {
        self.app
            .world_mut()
            .resource_mut::<TelemetryBuffer>()
            .push(frame);
        self.app.update();
        self.snapshot()
    }

    /// The snapshot assembled by the most recent tick.
    pub fn snapshot(&self) -> NavigationSnapshot {
        self.app.world().resource::<LatestSnapshot>().0.clone()
    }

    // ---- flight plan commands ----

    /// Replaces the flight plan. Hold definitions attached to waypoints are
    /// validated here so sequencing never meets an ill-formed hold.
    pub fn set_flight_plan(&mut self, waypoints: Vec<Waypoint>) -> Result<()> {
        let config = self.config();
        for wp in &waypoints {
            if let Some(hold) = &wp.hold {
                hold.resolve(
                    config.hold_leg_time_s,
                    config.hold_leg_time_min_s,
                    config.hold_leg_time_max_s,
                )?;
            }
        }
        info!("Flight plan set with {} waypoints", waypoints.len());
        self.with_plan(|plan| plan.set_waypoints(waypoints));
        self.with_obs(|obs| obs.clear_hold());
        Ok(())
    }

    pub fn insert_waypoint(&mut self, index: usize, waypoint: Waypoint) -> Result<()> {
        let config = self.config();
        if let Some(hold) = &waypoint.hold {
            hold.resolve(
                config.hold_leg_time_s,
                config.hold_leg_time_min_s,
                config.hold_leg_time_max_s,
            )?;
        }
        self.with_plan(|plan| plan.insert_waypoint(index, waypoint));
        Ok(())
    }

    pub fn remove_waypoint(&mut self, index: usize) -> Result<Waypoint> {
        self.with_plan(|plan| plan.remove_waypoint(index))
    }

    pub fn clear_flight_plan(&mut self) {
        info!("Flight plan cleared");
        self.with_plan(|plan| plan.clear());
        self.with_obs(|obs| obs.clear_hold());
    }

    /// A copy of the current plan, for the plan page of the UI.
    pub fn flight_plan(&mut self) -> FlightPlan {
        let world = self.app.world_mut();
        let mut query = world.query::<&FlightPlan>();
        query.single(world).clone()
    }

    /// Activates direct-to navigation toward `target`, anchored at the
    /// current aircraft position (or the target itself before any fix).
    /// Cancels OBS mode and any active hold, per unit convention.
    pub fn direct_to(&mut self, target: Waypoint) -> Result<()> {
        let anchor = self
            .app
            .world()
            .resource::<TelemetryBuffer>()
            .position()
            .unwrap_or((target.lat, target.lon));
        info!("Direct-to {}", target.ident);
        self.with_plan(|plan| plan.direct_to(target, anchor))?;
        self.with_obs(|obs| {
            obs.clear_hold();
            obs.active = false;
            obs.suspended = false;
        });
        self.with_cdi(|cdi| {
            if cdi.source == NavSource::Obs {
                cdi.source = NavSource::Gps;
            }
        });
        Ok(())
    }

    // ---- CDI / OBS commands ----

    /// Selects the CDI source. Selecting OBS suspends automatic
    /// sequencing; leaving it resumes sequencing unless a hold still has
    /// it suspended.
    pub fn set_nav_source(&mut self, source: NavSource) {
        self.with_cdi(|cdi| cdi.source = source);
        self.with_obs(|obs| {
            obs.active = source == NavSource::Obs;
            obs.suspended = obs.active || obs.hold_active;
        });
        info!("Nav source {:?}", source);
    }

    pub fn nav_source(&mut self) -> NavSource {
        let world = self.app.world_mut();
        let mut query = world.query::<&CdiState>();
        query.single(world).source
    }

    /// Sets the pilot-selected OBS course, in the configured course
    /// reference (magnetic by default).
    pub fn set_obs_course(&mut self, course_deg: f64) {
        let course = geo::wrap_360(course_deg);
        self.with_obs(|obs| obs.course_deg = course);
    }

    // ---- hold commands ----

    /// Activates a hold at the active waypoint. The definition is
    /// validated here; a missing inbound course or an out-of-envelope leg
    /// time is an error, never a silent Direct entry.
    pub fn activate_hold(&mut self, definition: HoldDefinition) -> Result<()> {
        let config = self.config();
        let (course, leg_time) = definition.resolve(
            config.hold_leg_time_s,
            config.hold_leg_time_min_s,
            config.hold_leg_time_max_s,
        )?;
        let fix = self.with_plan(|plan| {
            plan.active_waypoint()
                .map(|wp| HoldFix {
                    ident: wp.ident.clone(),
                    lat: wp.lat,
                    lon: wp.lon,
                })
                .ok_or(crate::resources::NavError::NoActivePlan)
        })?;
        info!("Hold activated at {} by command", fix.ident);
        self.with_obs(|obs| {
            obs.activate_hold(fix, course, leg_time, definition.turn, definition.max_laps)
        });
        Ok(())
    }

    /// Requests hold exit. The engine completes the current inbound leg
    /// and resumes sequencing at the fix; it never abandons a hold
    /// mid-outbound.
    pub fn exit_hold(&mut self) {
        self.with_obs(|obs| {
            if obs.hold_active {
                info!("Hold exit armed");
                obs.exit_armed = true;
            }
        });
    }

    /// Approach activation from the navdb/UI collaborator; narrows CDI
    /// sensitivity to the approach tier.
    pub fn set_approach_mode(&mut self, active: bool) {
        self.with_gps(|gps| gps.approach_active = active);
        info!("Approach mode {}", if active { "armed" } else { "cleared" });
    }

    // ---- map commands ----

    /// Destination runway from the navdb collaborator, for the extended
    /// centerline.
    pub fn set_destination_runway(&mut self, runway: Option<RunwayInfo>) {
        self.app.world_mut().resource_mut::<DestinationRunway>().0 = runway;
    }

    /// Manual range selection: snaps to the nearest member of the ranges
    /// list, and overrides auto zoom until the next waypoint sequence.
    /// Returns the range actually selected.
    pub fn select_range(&mut self, range_nm: f64) -> f64 {
        self.with_map(|map| {
            let selected = map.set_range(range_nm);
            map.auto_zoom_overridden = true;
            selected
        })
    }

    /// Manual orientation selection; also resets the north-up-above latch
    /// so the manual choice becomes the new baseline.
    pub fn set_orientation(&mut self, orientation: MapOrientation) {
        self.with_map(|map| {
            map.orientation = orientation;
            map.saved_orientation = None;
        });
    }

    pub fn set_layers(&mut self, layers: MapLayers) {
        self.with_map(|map| map.layers = layers);
    }

    /// Replaces the display settings (validated) and re-seeds the map
    /// state from them.
    pub fn update_settings(&mut self, settings: MapDisplaySettings) -> Result<()> {
        settings.validate()?;
        self.with_map(|map| {
            let mut rebuilt = MapState::new(
                settings.ranges_nm.clone(),
                settings.initial_range_nm,
                settings.orientation,
            );
            rebuilt.layers = settings.layers;
            *map = rebuilt;
        });
        self.app.world_mut().insert_resource(settings);
        Ok(())
    }

    pub fn settings(&self) -> MapDisplaySettings {
        self.app.world().resource::<MapDisplaySettings>().clone()
    }

    pub fn config(&self) -> NavConfig {
        self.app.world().resource::<NavConfig>().clone()
    }

    // ---- world access ----

    fn with_plan<R>(&mut self, f: impl FnOnce(&mut FlightPlan) -> R) -> R {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut FlightPlan>();
        f(&mut query.single_mut(world))
    }

    fn with_obs<R>(&mut self, f: impl FnOnce(&mut ObsState) -> R) -> R {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut ObsState>();
        f(&mut query.single_mut(world))
    }

    fn with_cdi<R>(&mut self, f: impl FnOnce(&mut CdiState) -> R) -> R {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut CdiState>();
        f(&mut query.single_mut(world))
    }

    fn with_gps<R>(&mut self, f: impl FnOnce(&mut GpsData) -> R) -> R {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut GpsData>();
        f(&mut query.single_mut(world))
    }

    fn with_map<R>(&mut self, f: impl FnOnce(&mut MapState) -> R) -> R {
        let world = self.app.world_mut();
        let mut query = world.query::<&mut MapState>();
        f(&mut query.single_mut(world))
    }
}

impl Default for NavigationComputer {
    fn default() -> Self {
        Self::new()
    }
}
