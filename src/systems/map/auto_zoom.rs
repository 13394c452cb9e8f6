use bevy::prelude::*;

use crate::components::{FlightPlan, MapState};
use crate::geo;
use crate::plugins::WaypointSequenced;
use crate::resources::{MapDisplaySettings, TelemetryBuffer};

/// Margin applied over the distance to the active waypoint so the fix sits
/// inside the displayed range rather than on its edge.
const AUTO_ZOOM_MARGIN: f64 = 1.2;

/// Selects the map range that keeps the active waypoint visible.
///
/// Runs every tick while enabled and on every waypoint-sequenced event. A
/// manual range selection overrides auto zoom until the next sequence
/// event, or until the computed range happens to match the manual one.
pub fn auto_zoom_system(
    settings: Res<MapDisplaySettings>,
    telemetry: Res<TelemetryBuffer>,
    mut query: Query<(&FlightPlan, &mut MapState)>,
    mut sequenced: EventReader<WaypointSequenced>,
) {
    let resequenced = sequenced.read().next().is_some();

    for (plan, mut map) in query.iter_mut() {
        if resequenced && map.auto_zoom_overridden {
            debug!("Waypoint sequenced, releasing manual zoom override");
            map.auto_zoom_overridden = false;
        }
        if !settings.auto_zoom.enabled {
            continue;
        }
        let Some(pos) = telemetry.position() else {
            continue;
        };
        let Some(wp) = plan.active_waypoint() else {
            continue;
        };

        let distance = geo::haversine_distance_nm(pos.0, pos.1, wp.lat, wp.lon);
        let target = distance * AUTO_ZOOM_MARGIN;
        let Some(range) = select_auto_range(
            map.ranges(),
            settings.auto_zoom.min_range_nm,
            settings.auto_zoom.max_range_nm,
            target,
        ) else {
            continue;
        };

        if map.auto_zoom_overridden {
            if map.range_nm() == range {
                map.auto_zoom_overridden = false;
            }
            continue;
        }
        if map.range_nm() != range {
            map.set_range(range);
            debug!(
                "Auto zoom selected {} nm for {:.1} nm to {}",
                range, distance, wp.ident
            );
        }
    }
}

/// The smallest in-bounds range covering `target`; when the target exceeds
/// every in-bounds range, the largest one (i.e. the nearest bound).
/// `None` when no range lies within the bounds at all.
pub fn select_auto_range(ranges: &[f64], min: f64, max: f64, target: f64) -> Option<f64> {
    let mut covering: Option<f64> = None;
    let mut largest: Option<f64> = None;
    for &r in ranges.iter().filter(|r| (min..=max).contains(*r)) {
        largest = Some(largest.map_or(r, |l: f64| l.max(r)));
        if r >= target && covering.map_or(true, |c| r < c) {
            covering = Some(r);
        }
    }
    covering.or(largest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGES: [f64; 7] = [2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0];

    #[test]
    fn test_selects_smallest_covering_range() {
        // 8 nm to the waypoint: target 9.6, smallest covering range is 10.
        assert_eq!(select_auto_range(&RANGES, 2.0, 100.0, 8.0 * 1.2), Some(10.0));
    }

    #[test]
    fn test_clamps_to_upper_bound() {
        assert_eq!(
            select_auto_range(&RANGES, 2.0, 100.0, 180.0),
            Some(100.0),
            "target beyond every in-bounds range clamps to the nearest bound"
        );
    }

    #[test]
    fn test_respects_lower_bound() {
        assert_eq!(select_auto_range(&RANGES, 10.0, 100.0, 1.0), Some(10.0));
    }

    #[test]
    fn test_no_range_within_bounds() {
        assert_eq!(select_auto_range(&RANGES, 300.0, 400.0, 50.0), None);
    }

    #[test]
    fn test_exact_member_target() {
        assert_eq!(select_auto_range(&RANGES, 2.0, 100.0, 20.0), Some(20.0));
    }
}
