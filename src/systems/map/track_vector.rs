use bevy::prelude::*;

use crate::components::map::{MapComputed, TrackVector};
use crate::components::telemetry::TelemetrySample;
use crate::geo;
use crate::resources::{MapDisplaySettings, NavConfig, TelemetryBuffer};

/// Projects the track vector ahead of the aircraft: the position it will
/// occupy after the configured look-ahead time at the current ground speed
/// and track. Suppressed below the minimum speed, where the vector is
/// meaningless noise.
pub fn track_vector_system(
    config: Res<NavConfig>,
    settings: Res<MapDisplaySettings>,
    telemetry: Res<TelemetryBuffer>,
    mut query: Query<&mut MapComputed>,
) {
    // Without a live fix the previous vector is left in place, matching the
    // held CDI figures.
    if !telemetry.fix_valid() {
        return;
    }
    let Some(sample) = telemetry.nav_sample() else {
        return;
    };

    for mut computed in query.iter_mut() {
        computed.track_vector = if settings.track_vector.enabled {
            compute_track_vector(
                sample,
                config.track_vector_min_speed_kt,
                settings.track_vector.length_s,
            )
        } else {
            None
        };
    }
}

/// The projected endpoint, or `None` below the minimum ground speed.
pub fn compute_track_vector(
    sample: &TelemetrySample,
    min_speed_kt: f64,
    length_s: f64,
) -> Option<TrackVector> {
    if sample.ground_speed_kt < min_speed_kt {
        return None;
    }
    let distance_nm = sample.ground_speed_kt / 3600.0 * length_s;
    let (end_lat, end_lon) =
        geo::project_position(sample.lat, sample.lon, sample.track_deg, distance_nm);
    Some(TrackVector {
        end_lat,
        end_lon,
        length_nm: distance_nm,
    })
}
