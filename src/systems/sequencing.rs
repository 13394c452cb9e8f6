use bevy::prelude::*;

use crate::components::{FlightPlan, ObsState};
use crate::geo;
use crate::plugins::WaypointSequenced;
use crate::resources::{NavConfig, TelemetryBuffer};

/// Advances the flight plan when the aircraft arrives at the active
/// waypoint.
///
/// A fix carrying a published hold uses the larger arrival radius so the
/// hold can be entered before the aircraft overflies it. Sequencing is
/// fully suspended while OBS mode or a hold has `suspended` set, and a
/// frame without a valid fix never sequences (the held position is stale).
pub fn waypoint_sequencing_system(
    config: Res<NavConfig>,
    telemetry: Res<TelemetryBuffer>,
    mut query: Query<(&mut FlightPlan, &ObsState)>,
    mut sequenced: EventWriter<WaypointSequenced>,
) {
    if !telemetry.fix_valid() {
        return;
    }
    let Some(pos) = telemetry.position() else {
        return;
    };

    for (mut plan, obs) in query.iter_mut() {
        if obs.suspended {
            continue;
        }

        // A direct-to overlay sequences on its own target, then hands the
        // plan back.
        if let Some(dt) = plan.direct_to_overlay() {
            let target = dt.target.clone();
            let distance = geo::haversine_distance_nm(pos.0, pos.1, target.lat, target.lon);
            let radius = arrival_radius(&config, target.hold.is_some());
            if distance <= radius {
                plan.complete_direct_to();
                info!(
                    "Direct-to target {} reached, resuming flight plan",
                    target.ident
                );
                sequenced.send(WaypointSequenced {
                    waypoint: target,
                    next_ident: plan.active_waypoint().map(|w| w.ident.clone()),
                });
            }
            continue;
        }

        let Some(active) = plan.active_waypoint() else {
            continue;
        };
        if active.passed {
            continue;
        }
        let distance = geo::haversine_distance_nm(pos.0, pos.1, active.lat, active.lon);
        if distance > arrival_radius(&config, active.hold.is_some()) {
            continue;
        }

        let waypoint = active.clone();
        if plan.sequence().is_some() {
            let next_ident = plan.active_waypoint().map(|w| w.ident.clone());
            info!(
                "Sequenced waypoint {} at {:.2} nm, next {:?}",
                waypoint.ident, distance, next_ident
            );
            sequenced.send(WaypointSequenced {
                waypoint,
                next_ident,
            });
        }
    }
}

/// Arrival radius for a waypoint: the default sequencing radius, or the
/// wider hold radius when a hold is published at the fix.
fn arrival_radius(config: &NavConfig, has_hold: bool) -> f64 {
    if has_hold {
        config.hold_sequence_radius_nm
    } else {
        config.sequence_radius_nm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_radius_widens_for_holds() {
        let config = NavConfig::default();
        assert_eq!(arrival_radius(&config, false), config.sequence_radius_nm);
        assert_eq!(arrival_radius(&config, true), config.hold_sequence_radius_nm);
        assert!(config.hold_sequence_radius_nm > config.sequence_radius_nm);
    }
}
