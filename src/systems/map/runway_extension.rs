use bevy::prelude::*;

use crate::components::map::{MapComputed, RunwayExtension};
use crate::geo;
use crate::resources::{
    DestinationRunway, MapDisplaySettings, NavConfig, RunwayExtensionCache, RunwayInfo,
};

/// Maintains the extended-centerline segment for the destination runway.
///
/// The segment runs a fixed distance out from the threshold along the
/// reciprocal of the runway heading, and is recomputed only when the
/// destination airport changes; every other tick serves it from the cache.
pub fn runway_extension_system(
    config: Res<NavConfig>,
    settings: Res<MapDisplaySettings>,
    destination: Res<DestinationRunway>,
    mut cache: ResMut<RunwayExtensionCache>,
    mut query: Query<&mut MapComputed>,
) {
    match &destination.0 {
        Some(runway) => {
            if cache.airport_ident.as_deref() != Some(runway.airport_ident.as_str()) {
                let segment = extension_segment(runway, config.runway_extension_nm);
                info!(
                    "Runway extension rebuilt for {} ({:.0} deg)",
                    runway.airport_ident, runway.heading_deg
                );
                cache.airport_ident = Some(runway.airport_ident.clone());
                cache.segment = Some(segment);
            }
        }
        None => cache.invalidate(),
    }

    for mut computed in query.iter_mut() {
        computed.runway_extension = if settings.runway_extension_enabled {
            cache.segment.clone()
        } else {
            None
        };
    }
}

/// Builds the extended centerline: `length_nm` from the threshold along the
/// reciprocal heading, i.e. out on the approach side.
pub fn extension_segment(runway: &RunwayInfo, length_nm: f64) -> RunwayExtension {
    let reciprocal = geo::wrap_360(runway.heading_deg + 180.0);
    let (end_lat, end_lon) = geo::project_position(
        runway.threshold_lat,
        runway.threshold_lon,
        reciprocal,
        length_nm,
    );
    RunwayExtension {
        airport_ident: runway.airport_ident.clone(),
        threshold_lat: runway.threshold_lat,
        threshold_lon: runway.threshold_lon,
        end_lat,
        end_lon,
        length_nm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn runway(heading_deg: f64) -> RunwayInfo {
        RunwayInfo {
            airport_ident: "KSEA".to_string(),
            threshold_lat: 47.4502,
            threshold_lon: -122.3088,
            heading_deg,
        }
    }

    #[test]
    fn test_segment_length_independent_of_heading() {
        for heading in [0.0, 45.0, 163.0, 270.0, 359.0] {
            let segment = extension_segment(&runway(heading), 5.0);
            let length = geo::haversine_distance_nm(
                segment.threshold_lat,
                segment.threshold_lon,
                segment.end_lat,
                segment.end_lon,
            );
            assert_relative_eq!(length, 5.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_segment_extends_on_approach_side() {
        // Runway 16: approach flown from the north, extension runs north.
        let segment = extension_segment(&runway(160.0), 5.0);
        let bearing = geo::initial_bearing_deg(
            segment.threshold_lat,
            segment.threshold_lon,
            segment.end_lat,
            segment.end_lon,
        );
        assert_relative_eq!(bearing, 340.0, epsilon = 0.5);
    }
}
