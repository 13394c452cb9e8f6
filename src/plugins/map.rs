use bevy::prelude::*;

use crate::plugins::NavSet;
use crate::resources::MapDisplaySettings;
use crate::systems::{
    auto_zoom_system, orientation_latch_system, runway_extension_system, track_vector_system,
};

/// Map display decisions: auto zoom, the north-up-above latch, the track
/// vector and the runway extension. Chained inside [`NavSet::Map`] so the
/// orientation latch always sees the range auto zoom just chose.
pub struct MapDisplayPlugin;

impl Plugin for MapDisplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapDisplaySettings>().add_systems(
            Update,
            (
                auto_zoom_system,
                orientation_latch_system,
                track_vector_system,
                runway_extension_system,
            )
                .chain()
                .in_set(NavSet::Map),
        );
    }
}
