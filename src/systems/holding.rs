use bevy::prelude::*;

use crate::components::hold::{HoldEntry, HoldFix, HoldLeg, ObsState, TurnDirection};
use crate::geo;
use crate::plugins::WaypointSequenced;
use crate::resources::{NavConfig, TelemetryBuffer};

/// Runs the holding-pattern state machine:
/// activation on arrival at a hold-carrying fix, one-time entry
/// classification, the timed outbound / fix-bound inbound racetrack, and
/// exit handling (pilot command or lap limit), which always completes the
/// inbound leg first.
pub fn holding_pattern_system(
    config: Res<NavConfig>,
    telemetry: Res<TelemetryBuffer>,
    mut query: Query<&mut ObsState>,
    mut sequenced: EventReader<WaypointSequenced>,
) {
    let arrivals: Vec<_> = sequenced
        .read()
        .filter(|event| event.waypoint.hold.is_some())
        .cloned()
        .collect();

    for mut obs in query.iter_mut() {
        for event in &arrivals {
            activate_from_waypoint(&config, &mut obs, event);
        }

        if !obs.hold_active {
            continue;
        }
        let Some(sample) = telemetry.nav_sample().cloned() else {
            continue;
        };

        // Entry geometry is classified exactly once, from the first sample
        // after activation, and kept for the life of the hold.
        if obs.entry == HoldEntry::Unknown {
            let course_true = config.course_to_true(&sample, obs.hold_course_deg);
            obs.entry = classify_entry(sample.track_deg, course_true, obs.turn);
            obs.start_leg(HoldLeg::Outbound, sample.timestamp);
            info!(
                "Hold entry classified as {:?} (track {:.0}, inbound course {:.0})",
                obs.entry, sample.track_deg, course_true
            );
            continue;
        }

        match obs.current_leg {
            HoldLeg::Outbound => {
                let Some(started) = obs.leg_started_at else {
                    obs.start_leg(HoldLeg::Outbound, sample.timestamp);
                    continue;
                };
                let elapsed =
                    (sample.timestamp - started).num_milliseconds() as f64 / 1000.0;
                obs.outbound_elapsed_s = elapsed.max(0.0);
                if elapsed >= obs.leg_time_s {
                    debug!("Outbound leg complete after {:.0} s, turning inbound", elapsed);
                    obs.start_leg(HoldLeg::Inbound, sample.timestamp);
                }
            }
            HoldLeg::Inbound => {
                if !telemetry.fix_valid() {
                    continue;
                }
                let Some(fix) = obs.hold_fix.clone() else {
                    // No fix to hold at; the state is unusable.
                    warn!("Hold active without a fix, clearing");
                    obs.clear_hold();
                    continue;
                };
                let distance =
                    geo::haversine_distance_nm(sample.lat, sample.lon, fix.lat, fix.lon);
                if distance > config.sequence_radius_nm {
                    continue;
                }
                obs.laps_completed += 1;
                let lap_limit_hit = obs
                    .max_laps
                    .map(|max| obs.laps_completed >= max)
                    .unwrap_or(false);
                if obs.exit_armed || lap_limit_hit {
                    info!(
                        "Hold at {} exited after {} lap(s)",
                        fix.ident, obs.laps_completed
                    );
                    obs.clear_hold();
                } else {
                    debug!(
                        "Hold lap {} complete at {}, turning outbound",
                        obs.laps_completed, fix.ident
                    );
                    obs.start_leg(HoldLeg::Outbound, sample.timestamp);
                }
            }
        }
    }
}

fn activate_from_waypoint(config: &NavConfig, obs: &mut ObsState, event: &WaypointSequenced) {
    let waypoint = &event.waypoint;
    let Some(def) = &waypoint.hold else {
        return;
    };
    match def.resolve(
        config.hold_leg_time_s,
        config.hold_leg_time_min_s,
        config.hold_leg_time_max_s,
    ) {
        Ok((course, leg_time)) => {
            obs.activate_hold(
                HoldFix {
                    ident: waypoint.ident.clone(),
                    lat: waypoint.lat,
                    lon: waypoint.lon,
                },
                course,
                leg_time,
                def.turn,
                def.max_laps,
            );
            info!(
                "Hold activated at {} ({:?} turns, {:.0} s legs)",
                waypoint.ident, def.turn, leg_time
            );
        }
        // Definitions are validated when the plan is built; an invalid one
        // reaching this point is skipped so the plan cannot stall.
        Err(err) => warn!("Ignoring hold at {}: {}", waypoint.ident, err),
    }
}

/// Standard 3-sector hold entry, as a pure function of the aircraft track
/// and the hold's inbound course (both degrees true).
///
/// The signed difference is normalized into (-180, 180] and mirrored for
/// left-turn holds, so one sector table serves both directions: within
/// ±70° of the inbound course is a Direct entry, beyond +110° on the far
/// side is a Teardrop, and the remainder is a Parallel entry.
pub fn classify_entry(track_deg: f64, inbound_course_deg: f64, turn: TurnDirection) -> HoldEntry {
    let diff = geo::wrap_180(track_deg - inbound_course_deg);
    let diff = match turn {
        TurnDirection::Right => diff,
        TurnDirection::Left => geo::wrap_180(-diff),
    };
    if diff.abs() <= 70.0 {
        HoldEntry::Direct
    } else if diff > 110.0 {
        HoldEntry::Teardrop
    } else {
        HoldEntry::Parallel
    }
}
