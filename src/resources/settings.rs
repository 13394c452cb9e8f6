use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::map::{MapLayers, MapOrientation};
use crate::resources::errors::{NavError, Result};

/// Track-vector lengths selectable on the unit [s].
pub const TRACK_VECTOR_LENGTHS_S: [f64; 5] = [30.0, 60.0, 120.0, 300.0, 600.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoZoomSettings {
    pub enabled: bool,
    /// Smallest range auto zoom may select [nm]
    pub min_range_nm: f64,
    /// Largest range auto zoom may select [nm]
    pub max_range_nm: f64,
}

impl Default for AutoZoomSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_range_nm: 2.0,
            max_range_nm: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackVectorSettings {
    pub enabled: bool,
    /// Look-ahead time, one of [`TRACK_VECTOR_LENGTHS_S`] [s]
    pub length_s: f64,
}

impl Default for TrackVectorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            length_s: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NorthUpAboveSettings {
    pub enabled: bool,
    /// Range at or above which the map is forced north-up [nm]
    pub threshold_nm: f64,
}

impl Default for NorthUpAboveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_nm: 50.0,
        }
    }
}

/// User-visible map display settings, persisted by the embedding
/// application between sessions.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDisplaySettings {
    pub auto_zoom: AutoZoomSettings,
    pub track_vector: TrackVectorSettings,
    pub north_up_above: NorthUpAboveSettings,
    pub runway_extension_enabled: bool,
    /// Selectable map ranges, ascending [nm]
    pub ranges_nm: Vec<f64>,
    pub initial_range_nm: f64,
    pub orientation: MapOrientation,
    pub layers: MapLayers,
}

impl Default for MapDisplaySettings {
    fn default() -> Self {
        Self {
            auto_zoom: AutoZoomSettings::default(),
            track_vector: TrackVectorSettings::default(),
            north_up_above: NorthUpAboveSettings::default(),
            runway_extension_enabled: true,
            ranges_nm: vec![2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0],
            initial_range_nm: 10.0,
            orientation: MapOrientation::TrackUp,
            layers: MapLayers::default(),
        }
    }
}

impl MapDisplaySettings {
    pub fn load(path: &str) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let settings: Self = serde_yaml::from_reader(file)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    /// Rejects configurations the map controller cannot honor: inverted
    /// auto-zoom bounds, an empty or unsorted ranges list, an initial range
    /// off the list, and a track-vector length the unit does not offer.
    pub fn validate(&self) -> Result<()> {
        if self.auto_zoom.min_range_nm > self.auto_zoom.max_range_nm {
            return Err(NavError::RangeOutOfBounds {
                min: self.auto_zoom.min_range_nm,
                max: self.auto_zoom.max_range_nm,
            });
        }
        if self.ranges_nm.is_empty() {
            return Err(NavError::InvalidSettings("ranges list is empty".to_string()));
        }
        if self.ranges_nm.windows(2).any(|w| w[0] >= w[1]) {
            return Err(NavError::InvalidSettings(
                "ranges list must be strictly ascending".to_string(),
            ));
        }
        if !self.ranges_nm.contains(&self.initial_range_nm) {
            return Err(NavError::InvalidSettings(format!(
                "initial range {} nm is not in the ranges list",
                self.initial_range_nm
            )));
        }
        if !TRACK_VECTOR_LENGTHS_S.contains(&self.track_vector.length_s) {
            return Err(NavError::InvalidSettings(format!(
                "track vector length {} s is not selectable",
                self.track_vector.length_s
            )));
        }
        Ok(())
    }
}
