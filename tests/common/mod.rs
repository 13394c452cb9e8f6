mod assertions;
mod fixtures;

// Re-export
pub use assertions::{assert_course_eq, assert_snapshot_valid};

pub use fixtures::*;
