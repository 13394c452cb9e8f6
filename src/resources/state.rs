use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::snapshot::NavigationSnapshot;
use crate::components::telemetry::{TelemetryFrame, TelemetrySample};
use crate::components::map::RunwayExtension;

/// Telemetry intake for the current tick.
///
/// The façade pushes one frame before each schedule run; systems read the
/// current frame and fall back to the last valid fix when the feed reports
/// signal loss, so outputs degrade instead of jumping to zeros.
#[derive(Resource, Debug, Default)]
pub struct TelemetryBuffer {
    current: Option<TelemetryFrame>,
    last_fix: Option<TelemetrySample>,
}

impl TelemetryBuffer {
    pub fn push(&mut self, frame: TelemetryFrame) {
        if frame.sample.fix_valid {
            self.last_fix = Some(frame.sample.clone());
        }
        self.current = Some(frame);
    }

    pub fn frame(&self) -> Option<&TelemetryFrame> {
        self.current.as_ref()
    }

    /// The sample to navigate from: the current one when its fix is valid,
    /// otherwise the most recent valid fix.
    pub fn nav_sample(&self) -> Option<&TelemetrySample> {
        match self.current.as_ref() {
            Some(frame) if frame.sample.fix_valid => Some(&frame.sample),
            _ => self.last_fix.as_ref(),
        }
    }

    /// Whether the current frame carries a usable fix.
    pub fn fix_valid(&self) -> bool {
        self.current
            .as_ref()
            .map(|f| f.sample.fix_valid)
            .unwrap_or(false)
    }

    /// Last known aircraft position (lat, lon) [deg], if any fix was ever
    /// received.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.nav_sample().map(|s| s.position())
    }
}

/// Destination runway data supplied by the navigation database
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayInfo {
    pub airport_ident: String,
    pub threshold_lat: f64,
    pub threshold_lon: f64,
    /// Runway heading [deg true]
    pub heading_deg: f64,
}

/// The active destination runway, if the navdb has provided one.
#[derive(Resource, Debug, Default)]
pub struct DestinationRunway(pub Option<RunwayInfo>);

/// Cached runway-extension geometry, keyed by destination airport so the
/// segment is recomputed only when the destination changes.
#[derive(Resource, Debug, Default)]
pub struct RunwayExtensionCache {
    pub airport_ident: Option<String>,
    pub segment: Option<RunwayExtension>,
}

impl RunwayExtensionCache {
    pub fn invalidate(&mut self) {
        self.airport_ident = None;
        self.segment = None;
    }
}

/// The snapshot assembled at the end of the last tick, read back by the
/// façade after each schedule run.
#[derive(Resource, Debug, Clone, Default)]
pub struct LatestSnapshot(pub NavigationSnapshot);
