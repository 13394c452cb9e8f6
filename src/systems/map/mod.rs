mod auto_zoom;
mod orientation;
mod runway_extension;
mod track_vector;

pub use auto_zoom::{auto_zoom_system, select_auto_range};
pub use orientation::orientation_latch_system;
pub use runway_extension::{extension_segment, runway_extension_system};
pub use track_vector::{compute_track_vector, track_vector_system};
