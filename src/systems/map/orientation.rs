use bevy::prelude::*;

use crate::components::map::{MapOrientation, MapState};
use crate::resources::MapDisplaySettings;

/// North-up-above: forces the map north-up at long ranges and restores the
/// pilot's orientation when zooming back in.
///
/// One-bit latch keyed on the threshold comparison alone: `range >=
/// threshold` is the north-up condition, so a range parked exactly on the
/// threshold stays north-up and cannot oscillate.
pub fn orientation_latch_system(
    settings: Res<MapDisplaySettings>,
    mut query: Query<&mut MapState>,
) {
    for mut map in query.iter_mut() {
        if !settings.north_up_above.enabled {
            // Latch released without restoring, so disabling the feature
            // at long range never yanks the map around.
            map.saved_orientation = None;
            continue;
        }
        if map.range_nm() >= settings.north_up_above.threshold_nm {
            if map.orientation != MapOrientation::NorthUp {
                info!(
                    "Range {} nm at or above {} nm, forcing north-up",
                    map.range_nm(),
                    settings.north_up_above.threshold_nm
                );
                map.saved_orientation = Some(map.orientation);
                map.orientation = MapOrientation::NorthUp;
            }
        } else if let Some(saved) = map.saved_orientation.take() {
            info!("Range below threshold, restoring {:?}", saved);
            map.orientation = saved;
        }
    }
}
