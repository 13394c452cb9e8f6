mod holding;
pub mod map;
mod resolver;
mod sequencing;
mod snapshot;

pub use holding::{classify_entry, holding_pattern_system};
pub use map::{
    auto_zoom_system, compute_track_vector, extension_segment, orientation_latch_system,
    runway_extension_system, select_auto_range, track_vector_system,
};
pub use resolver::navigation_resolver_system;
pub use sequencing::waypoint_sequencing_system;
pub use snapshot::snapshot_system;
