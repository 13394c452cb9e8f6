use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Moving-map rotation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapOrientation {
    NorthUp,
    TrackUp,
    HeadingUp,
}

impl Default for MapOrientation {
    fn default() -> Self {
        MapOrientation::NorthUp
    }
}

/// Per-layer visibility flags for the moving map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayers {
    pub airports: bool,
    pub navaids: bool,
    pub intersections: bool,
    pub airspace: bool,
    pub traffic: bool,
    pub terrain: bool,
}

impl Default for MapLayers {
    fn default() -> Self {
        Self {
            airports: true,
            navaids: true,
            intersections: false,
            airspace: true,
            traffic: true,
            terrain: false,
        }
    }
}

/// Terrain alerting level. Ordering is by severity, so `max` over a set of
/// cells yields the alert to annunciate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainAlert {
    Clear,
    DontSink,
    Terrain,
    PullUp,
}

impl TerrainAlert {
    /// Display color for the alert level, RGB. Derived here so renderers
    /// cannot drift out of sync with the level.
    pub fn color(&self) -> [u8; 3] {
        match self {
            TerrainAlert::Clear => [0, 0, 0],
            TerrainAlert::DontSink => [255, 255, 0],
            TerrainAlert::Terrain => [255, 165, 0],
            TerrainAlert::PullUp => [255, 0, 0],
        }
    }
}

impl Default for TerrainAlert {
    fn default() -> Self {
        TerrainAlert::Clear
    }
}

/// Persistent moving-map display state.
///
/// Invariant: `range_nm` is always a member of `ranges`. Range mutation
/// goes through [`MapState::set_range`], which snaps to the nearest member.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    range_nm: f64,
    ranges: Vec<f64>,
    pub orientation: MapOrientation,
    pub layers: MapLayers,
    /// Manual zoom has overridden auto zoom until the next sequence event
    pub auto_zoom_overridden: bool,
    /// Orientation saved by the north-up-above latch, restored when range
    /// drops back below the threshold
    pub saved_orientation: Option<MapOrientation>,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            range_nm: 10.0,
            ranges: vec![2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0],
            orientation: MapOrientation::NorthUp,
            layers: MapLayers::default(),
            auto_zoom_overridden: false,
            saved_orientation: None,
        }
    }
}

impl MapState {
    /// Builds map state from a ranges list and initial selection, snapping
    /// the selection onto the list to hold the membership invariant.
    pub fn new(ranges: Vec<f64>, initial_range_nm: f64, orientation: MapOrientation) -> Self {
        let mut state = Self {
            ranges,
            orientation,
            ..Default::default()
        };
        if state.ranges.is_empty() {
            state.ranges = MapState::default().ranges;
        }
        state.range_nm = state.nearest_range(initial_range_nm);
        state
    }

    pub fn range_nm(&self) -> f64 {
        self.range_nm
    }

    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    /// Sets the displayed range, snapped to the nearest member of the
    /// ranges list. Returns the range actually selected.
    pub fn set_range(&mut self, range_nm: f64) -> f64 {
        self.range_nm = self.nearest_range(range_nm);
        self.range_nm
    }

    fn nearest_range(&self, target: f64) -> f64 {
        let mut best = self.ranges[0];
        for &r in &self.ranges {
            if (r - target).abs() < (best - target).abs() {
                best = r;
            }
        }
        best
    }
}

/// Track-vector endpoint projected ahead of the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackVector {
    pub end_lat: f64,
    pub end_lon: f64,
    pub length_nm: f64,
}

/// Extended runway centerline for the destination airport: a fixed-length
/// segment from the threshold out along the reciprocal heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayExtension {
    pub airport_ident: String,
    pub threshold_lat: f64,
    pub threshold_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub length_nm: f64,
}

/// Per-tick map geometry derived from telemetry and settings, rebuilt by
/// the map systems each update and collected into the snapshot.
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapComputed {
    pub track_vector: Option<TrackVector>,
    pub runway_extension: Option<RunwayExtension>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_alert_severity_ordering() {
        assert!(TerrainAlert::Clear < TerrainAlert::DontSink);
        assert!(TerrainAlert::DontSink < TerrainAlert::Terrain);
        assert!(TerrainAlert::Terrain < TerrainAlert::PullUp);
        let worst = [TerrainAlert::Terrain, TerrainAlert::Clear, TerrainAlert::DontSink]
            .into_iter()
            .max();
        assert_eq!(worst, Some(TerrainAlert::Terrain));
    }

    #[test]
    fn test_set_range_snaps_to_list() {
        let mut map = MapState::default();
        assert_eq!(map.set_range(7.0), 5.0);
        assert_eq!(map.set_range(8.0), 10.0);
        assert_eq!(map.set_range(500.0), 200.0);
        assert!(map.ranges().contains(&map.range_nm()));
    }

    #[test]
    fn test_new_snaps_initial_range() {
        let map = MapState::new(vec![5.0, 10.0, 25.0], 11.0, MapOrientation::TrackUp);
        assert_eq!(map.range_nm(), 10.0);
        assert_eq!(map.orientation, MapOrientation::TrackUp);
    }
}
