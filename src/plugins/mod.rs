mod events;
mod map;
mod navigation;

pub use events::WaypointSequenced;
pub use map::MapDisplayPlugin;
pub use navigation::{NavSet, NavigationCorePlugin};
