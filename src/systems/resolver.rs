use bevy::prelude::*;

use crate::components::cdi::{CdiScale, CdiState, GpsData, NavRadioData, NavRadios, NavSource, ToFrom};
use crate::components::flight_plan::FlightPlan;
use crate::components::hold::ObsState;
use crate::components::telemetry::{RadioSignal, TelemetrySample};
use crate::components::waypoint::Waypoint;
use crate::geo;
use crate::resources::{NavConfig, TelemetryBuffer};

/// Feet per nautical mile, for the VNAV path computation.
const FT_PER_NM: f64 = 6076.115;

/// Resolves CDI, GPS and radio data for the selected navigation source.
///
/// GPS figures are computed every tick regardless of the selected source so
/// the moving map can always draw flight-plan geometry. When telemetry
/// reports no usable fix, the previous GPS figures are held and only the
/// validity flag drops, so the renderer keeps a stable picture.
pub fn navigation_resolver_system(
    config: Res<NavConfig>,
    telemetry: Res<TelemetryBuffer>,
    mut query: Query<(&FlightPlan, &ObsState, &mut CdiState, &mut GpsData, &mut NavRadios)>,
) {
    for (plan, obs, mut cdi, mut gps, mut radios) in query.iter_mut() {
        if let Some(frame) = telemetry.frame() {
            radios.nav1 = format_radio(frame.nav1.as_ref());
            radios.nav2 = format_radio(frame.nav2.as_ref());
        }

        let fix_ok = telemetry.fix_valid();
        let Some(sample) = telemetry.nav_sample().cloned() else {
            cdi.signal_valid = false;
            continue;
        };

        if plan.is_empty() {
            gps.deflection = 0;
            gps.cross_track_nm = 0.0;
            gps.obs_course_deg = obs.course_deg;
            cdi.signal_valid = false;
            if matches!(cdi.source, NavSource::Gps | NavSource::Obs) {
                cdi.deflection = 0;
                cdi.cross_track_nm = 0.0;
                cdi.to_from = ToFrom::None;
                cdi.glideslope_valid = false;
            }
            apply_radio_source(&mut cdi, &radios);
            continue;
        }

        if fix_ok {
            let (scale, full_scale) = select_scale(
                &config,
                plan.distance_to_destination_nm(sample.position()),
                gps.approach_active,
            );
            if scale != gps.scale {
                info!("CDI scale {} ({} nm full scale)", scale.label(), full_scale);
            }
            gps.scale = scale;
            gps.full_scale_nm = full_scale;

            if let Some(res) = resolve_gps_course(&config, plan, obs, &sample) {
                gps.cross_track_nm = res.cross_track_nm;
                gps.desired_track_deg = config.course_to_output(&sample, res.desired_track_true);
                gps.deflection = geo::clamp_needle(res.cross_track_nm, full_scale);
                gps.obs_course_deg = obs.course_deg;
                gps.vertical_error_ft = vertical_error_ft(
                    &config,
                    plan.active_waypoint(),
                    &sample,
                );

                if matches!(cdi.source, NavSource::Gps | NavSource::Obs) {
                    cdi.deflection = gps.deflection;
                    cdi.desired_track_deg = gps.desired_track_deg;
                    cdi.cross_track_nm = gps.cross_track_nm;
                    cdi.to_from = res.to_from;
                    cdi.signal_valid = true;
                    apply_gps_glideslope(&config, &gps, plan.active_waypoint(), &mut cdi);
                }
            }
        } else if matches!(cdi.source, NavSource::Gps | NavSource::Obs) {
            // Degraded: hold last-known figures, flag the loss.
            cdi.signal_valid = false;
        }

        apply_radio_source(&mut cdi, &radios);
    }
}

struct GpsResolution {
    desired_track_true: f64,
    cross_track_nm: f64,
    to_from: ToFrom,
}

/// Course geometry for the GPS/OBS sources: desired track, signed
/// cross-track error and the TO/FROM flag.
///
/// Priority: an active hold navigates the inbound course through the hold
/// fix; OBS mode navigates the selected course through the active
/// waypoint; otherwise the flight-plan leg applies.
fn resolve_gps_course(
    config: &NavConfig,
    plan: &FlightPlan,
    obs: &ObsState,
    sample: &TelemetrySample,
) -> Option<GpsResolution> {
    let pos = sample.position();

    if obs.hold_active {
        if let Some(fix) = &obs.hold_fix {
            let course_true = config.course_to_true(sample, obs.hold_course_deg);
            return Some(course_through_point(
                (fix.lat, fix.lon),
                course_true,
                pos,
            ));
        }
    }

    if obs.active {
        let wp = plan.active_waypoint()?;
        let course_true = config.course_to_true(sample, obs.course_deg);
        return Some(course_through_point(wp.position(), course_true, pos));
    }

    let leg = plan.active_leg(pos).ok()?;
    let leg_length =
        geo::haversine_distance_nm(leg.from.0, leg.from.1, leg.to.lat, leg.to.lon);
    if leg_length == 0.0 {
        // Degenerate leg: center the needle on the bearing to the fix.
        let dtk = geo::initial_bearing_deg(pos.0, pos.1, leg.to.lat, leg.to.lon);
        return Some(GpsResolution {
            desired_track_true: dtk,
            cross_track_nm: 0.0,
            to_from: to_from_at(leg.to.position(), dtk, pos),
        });
    }
    let dtk = leg.desired_track_deg();
    Some(GpsResolution {
        desired_track_true: dtk,
        cross_track_nm: geo::cross_track_error_nm(leg.from.0, leg.from.1, pos.0, pos.1, dtk),
        to_from: to_from_at(leg.to.position(), dtk, pos),
    })
}

/// Geometry for a course line through a point (hold fix or OBS waypoint).
fn course_through_point(
    point: (f64, f64),
    course_true: f64,
    aircraft: (f64, f64),
) -> GpsResolution {
    GpsResolution {
        desired_track_true: course_true,
        cross_track_nm: geo::cross_track_error_nm(
            point.0,
            point.1,
            aircraft.0,
            aircraft.1,
            course_true,
        ),
        to_from: to_from_at(point, course_true, aircraft),
    }
}

/// TO/FROM indication relative to a fix: the flag flips exactly at the
/// abeam line. With the aircraft behind the fix the bearing from the fix
/// back to the aircraft sits near the course reciprocal, so a relative
/// bearing of 90° or more reads TO.
fn to_from_at(fix: (f64, f64), course_true: f64, aircraft: (f64, f64)) -> ToFrom {
    if fix == aircraft {
        return ToFrom::None;
    }
    let bearing = geo::initial_bearing_deg(fix.0, fix.1, aircraft.0, aircraft.1);
    if geo::wrap_180(bearing - course_true).abs() >= 90.0 {
        ToFrom::To
    } else {
        ToFrom::From
    }
}

/// GPS CDI sensitivity tier for the distance to destination. The approach
/// tier wins outright once an approach is active; otherwise the boundary
/// sits exactly at the terminal distance (d <= 30 nm reads terminal).
fn select_scale(
    config: &NavConfig,
    distance_to_destination_nm: Option<f64>,
    approach_active: bool,
) -> (CdiScale, f64) {
    if approach_active {
        return (CdiScale::Approach, config.approach_full_scale_nm);
    }
    match distance_to_destination_nm {
        Some(d) if d <= config.terminal_distance_nm => {
            (CdiScale::Terminal, config.terminal_full_scale_nm)
        }
        _ => (CdiScale::EnRoute, config.enroute_full_scale_nm),
    }
}

/// VNAV deviation from a descent path into the active waypoint's altitude
/// constraint. Positive = above path; no constraint = no deviation.
fn vertical_error_ft(
    config: &NavConfig,
    active: Option<&Waypoint>,
    sample: &TelemetrySample,
) -> f64 {
    let Some(wp) = active else {
        return 0.0;
    };
    let Some(constraint_ft) = wp.altitude_ft else {
        return 0.0;
    };
    let distance_nm = geo::haversine_distance_nm(sample.lat, sample.lon, wp.lat, wp.lon);
    let path_ft =
        constraint_ft + config.vnav_path_angle_deg.to_radians().tan() * distance_nm * FT_PER_NM;
    sample.altitude_ft - path_ft
}

/// Drives the glidepath needle from the VNAV deviation while the active
/// waypoint carries an altitude constraint.
fn apply_gps_glideslope(
    config: &NavConfig,
    gps: &GpsData,
    active: Option<&Waypoint>,
    cdi: &mut CdiState,
) {
    let has_constraint = active.map(|w| w.altitude_ft.is_some()).unwrap_or(false);
    cdi.glideslope_valid = has_constraint;
    cdi.glideslope = if has_constraint {
        let scaled = -gps.vertical_error_ft / config.vnav_full_scale_ft * 119.0;
        scaled.round().clamp(-119.0, 119.0) as i32
    } else {
        0
    };
}

/// Formats one NAV receiver feed into renderable radio data. The core
/// never derives these figures from the flight plan; absent a feed the
/// radio reads as no signal.
fn format_radio(signal: Option<&RadioSignal>) -> NavRadioData {
    let Some(signal) = signal else {
        return NavRadioData::default();
    };
    NavRadioData {
        deflection: signal.deflection.clamp(-127, 127),
        obs_course_deg: geo::wrap_360(signal.obs_course_deg),
        from_radial_deg: geo::wrap_360(signal.from_radial_deg),
        to_from: signal.to_from,
        signal_strength_pct: signal.signal_strength_pct.clamp(0.0, 100.0),
        glideslope: signal.glideslope.clamp(-119, 119),
        glideslope_invalid: signal.glideslope_invalid,
        dme_nm: signal.dme_nm,
        station_ident: signal.station_ident.clone(),
    }
}

/// Copies the selected radio's figures onto the CDI when a radio source is
/// active. Radio deflection comes from the receiver, not from the plan,
/// and carries no cross-track distance.
fn apply_radio_source(cdi: &mut CdiState, radios: &NavRadios) {
    let radio = match cdi.source {
        NavSource::Nav1 => &radios.nav1,
        NavSource::Nav2 => &radios.nav2,
        NavSource::Gps | NavSource::Obs => return,
    };
    cdi.deflection = radio.deflection;
    cdi.desired_track_deg = radio.obs_course_deg;
    cdi.cross_track_nm = 0.0;
    cdi.to_from = radio.to_from;
    cdi.glideslope = radio.glideslope;
    cdi.glideslope_valid = !radio.glideslope_invalid && radio.signal_strength_pct > 0.0;
    cdi.signal_valid = radio.signal_strength_pct > 0.0;
}
