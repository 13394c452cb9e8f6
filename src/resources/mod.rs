pub mod config;
pub mod errors;
pub mod settings;
pub mod state;

pub use config::NavConfig;
pub use errors::{NavError, Result};
pub use settings::{
    AutoZoomSettings, MapDisplaySettings, NorthUpAboveSettings, TrackVectorSettings,
    TRACK_VECTOR_LENGTHS_S,
};
pub use state::{
    DestinationRunway, LatestSnapshot, RunwayExtensionCache, RunwayInfo, TelemetryBuffer,
};
