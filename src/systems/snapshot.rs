use bevy::prelude::*;

use crate::components::cdi::{CdiState, GpsData, NavRadios};
use crate::components::flight_plan::FlightPlan;
use crate::components::hold::ObsState;
use crate::components::map::{MapComputed, MapState};
use crate::components::snapshot::{LegSummary, MapDecisions, NavigationSnapshot, TrafficGeometry};
use crate::components::telemetry::{TelemetrySample, TrafficTarget};
use crate::geo;
use crate::resources::{LatestSnapshot, NavConfig, TelemetryBuffer};

/// Collects the navigator's state into the snapshot the façade returns to
/// the rendering collaborator. Runs last in the tick pipeline.
pub fn snapshot_system(
    config: Res<NavConfig>,
    telemetry: Res<TelemetryBuffer>,
    mut latest: ResMut<LatestSnapshot>,
    query: Query<(
        &FlightPlan,
        &CdiState,
        &GpsData,
        &NavRadios,
        &ObsState,
        &MapState,
        &MapComputed,
    )>,
) {
    let Ok((plan, cdi, gps, radios, obs, map, computed)) = query.get_single() else {
        return;
    };
    let frame = telemetry.frame();
    let sample = telemetry.nav_sample();

    latest.0 = NavigationSnapshot {
        timestamp: frame.map(|f| f.sample.timestamp),
        cdi: cdi.clone(),
        gps: gps.clone(),
        nav1: radios.nav1.clone(),
        nav2: radios.nav2.clone(),
        obs: obs.clone(),
        map: MapDecisions {
            range_nm: map.range_nm(),
            orientation: map.orientation,
            layers: map.layers,
            auto_zoom_overridden: map.auto_zoom_overridden,
            track_vector: computed.track_vector,
            runway_extension: computed.runway_extension.clone(),
            terrain_alert: frame.map(|f| f.terrain_alert).unwrap_or_default(),
        },
        leg: sample.and_then(|s| build_leg_summary(&config, plan, s)),
        traffic: frame
            .zip(sample)
            .map(|(f, s)| traffic_geometry(&f.traffic, s))
            .unwrap_or_default(),
    };
}

/// Data-bar figures for the active leg: distance, bearing, desired track,
/// ETE/ETA and the distance remaining to the destination. ETE and ETA are
/// withheld below the floor speed, where the division degenerates.
fn build_leg_summary(
    config: &NavConfig,
    plan: &FlightPlan,
    sample: &TelemetrySample,
) -> Option<LegSummary> {
    let pos = sample.position();
    let wp = plan.active_waypoint()?;
    let distance_nm = geo::haversine_distance_nm(pos.0, pos.1, wp.lat, wp.lon);
    let bearing_true = geo::initial_bearing_deg(pos.0, pos.1, wp.lat, wp.lon);
    let dtk_true = plan.active_leg(pos).ok()?.desired_track_deg();

    let ete_s = if sample.ground_speed_kt >= config.ete_min_speed_kt {
        Some(distance_nm / sample.ground_speed_kt * 3600.0)
    } else {
        None
    };
    let eta = ete_s
        .map(|s| sample.timestamp + chrono::Duration::milliseconds((s * 1000.0) as i64));

    Some(LegSummary {
        to_ident: wp.ident.clone(),
        distance_nm,
        bearing_deg: config.course_to_output(sample, bearing_true),
        desired_track_deg: config.course_to_output(sample, dtk_true),
        ete_s,
        eta,
        destination_distance_nm: plan.distance_remaining_nm(pos).unwrap_or(distance_nm),
    })
}

/// Relative geometry of the traffic feed: bearing relative to ownship
/// track, range, altitude delta and closure rate, ready for the map's
/// traffic layer.
fn traffic_geometry(targets: &[TrafficTarget], sample: &TelemetrySample) -> Vec<TrafficGeometry> {
    targets
        .iter()
        .map(|t| {
            let range_nm = geo::haversine_distance_nm(sample.lat, sample.lon, t.lat, t.lon);
            let bearing = geo::initial_bearing_deg(sample.lat, sample.lon, t.lat, t.lon);
            let own_along = sample.ground_speed_kt
                * (sample.track_deg - bearing).to_radians().cos();
            let target_along =
                t.ground_speed_kt * (t.track_deg - bearing).to_radians().cos();
            TrafficGeometry {
                ident: t.ident.clone(),
                relative_bearing_deg: geo::wrap_180(bearing - sample.track_deg),
                range_nm,
                altitude_delta_ft: t.altitude_ft - sample.altitude_ft,
                closing_kt: own_along - target_along,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn own_sample() -> TelemetrySample {
        TelemetrySample {
            lat: 47.0,
            lon: -122.0,
            ground_speed_kt: 120.0,
            heading_deg: 0.0,
            magnetic_heading_deg: 0.0,
            track_deg: 0.0,
            magnetic_variation_deg: 0.0,
            altitude_ft: 5000.0,
            fix_valid: true,
            timestamp: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_traffic_relative_bearing_and_altitude() {
        let own = own_sample();
        let targets = vec![TrafficTarget {
            ident: "N123".to_string(),
            lat: 47.0,
            lon: -121.5,
            altitude_ft: 6000.0,
            ground_speed_kt: 0.0,
            track_deg: 0.0,
        }];
        let geometry = traffic_geometry(&targets, &own);
        assert_eq!(geometry.len(), 1);
        assert_relative_eq!(geometry[0].relative_bearing_deg, 90.0, epsilon = 0.5);
        assert_relative_eq!(geometry[0].altitude_delta_ft, 1000.0);
    }

    #[test]
    fn test_head_on_closure_sums_speeds() {
        let own = own_sample();
        // Target dead ahead, flying straight at us.
        let targets = vec![TrafficTarget {
            ident: "N456".to_string(),
            lat: 47.5,
            lon: -122.0,
            altitude_ft: 5000.0,
            ground_speed_kt: 100.0,
            track_deg: 180.0,
        }];
        let geometry = traffic_geometry(&targets, &own);
        assert_relative_eq!(geometry[0].closing_kt, 220.0, epsilon = 0.5);
        assert_relative_eq!(geometry[0].relative_bearing_deg, 0.0, epsilon = 0.5);
    }

    #[test]
    fn test_co_speed_same_direction_is_zero_closure() {
        let mut own = own_sample();
        own.ground_speed_kt = 100.0;
        let targets = vec![TrafficTarget {
            ident: "N789".to_string(),
            lat: 47.5,
            lon: -122.0,
            altitude_ft: 5000.0,
            ground_speed_kt: 100.0,
            track_deg: 0.0,
        }];
        let geometry = traffic_geometry(&targets, &own);
        assert_relative_eq!(geometry[0].closing_kt, 0.0, epsilon = 0.5);
    }
}
