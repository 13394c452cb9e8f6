use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Selected navigation source driving the CDI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavSource {
    Gps,
    Nav1,
    Nav2,
    Obs,
}

impl Default for NavSource {
    fn default() -> Self {
        NavSource::Gps
    }
}

/// TO/FROM flag relative to the active fix or station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToFrom {
    To,
    From,
    None,
}

impl Default for ToFrom {
    fn default() -> Self {
        ToFrom::None
    }
}

/// GPS CDI sensitivity tier. Full-scale needle deflection narrows as the
/// aircraft nears the destination and again once an approach is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CdiScale {
    EnRoute,
    Terminal,
    Approach,
}

impl CdiScale {
    /// Annunciator text as shown on the unit.
    pub fn label(&self) -> &'static str {
        match self {
            CdiScale::EnRoute => "ENR",
            CdiScale::Terminal => "TERM",
            CdiScale::Approach => "APR",
        }
    }
}

impl Default for CdiScale {
    fn default() -> Self {
        CdiScale::EnRoute
    }
}

/// Course deviation indicator state for the selected source.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdiState {
    pub source: NavSource,
    /// Needle deflection, -127..=127, 0 centered, saturating at the ends
    pub deflection: i32,
    /// Desired track [deg], 0..360
    pub desired_track_deg: f64,
    /// Cross-track error [nm], positive = right of course
    pub cross_track_nm: f64,
    pub to_from: ToFrom,
    /// Glideslope needle, -119..=119
    pub glideslope: i32,
    pub glideslope_valid: bool,
    /// False until a plan is set and telemetry reports a valid fix
    pub signal_valid: bool,
}

impl Default for CdiState {
    fn default() -> Self {
        Self {
            source: NavSource::Gps,
            deflection: 0,
            desired_track_deg: 0.0,
            cross_track_nm: 0.0,
            to_from: ToFrom::None,
            glideslope: 0,
            glideslope_valid: false,
            signal_valid: false,
        }
    }
}

/// GPS-computed navigation data, valid regardless of the selected CDI
/// source so the moving map can always draw the flight-plan geometry.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsData {
    pub deflection: i32,
    pub cross_track_nm: f64,
    pub desired_track_deg: f64,
    pub obs_course_deg: f64,
    /// VNAV deviation [ft], positive = above path
    pub vertical_error_ft: f64,
    /// Narrows CDI sensitivity to the approach tier
    pub approach_active: bool,
    pub scale: CdiScale,
    /// Full-scale deflection distance for the active tier [nm]
    pub full_scale_nm: f64,
}

impl Default for GpsData {
    fn default() -> Self {
        Self {
            deflection: 0,
            cross_track_nm: 0.0,
            desired_track_deg: 0.0,
            obs_course_deg: 0.0,
            vertical_error_ft: 0.0,
            approach_active: false,
            scale: CdiScale::EnRoute,
            full_scale_nm: 5.0,
        }
    }
}

/// Formatted state of one NAV radio, passed through from the external
/// radio model. The core never computes these from the flight plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavRadioData {
    pub deflection: i32,
    pub obs_course_deg: f64,
    pub from_radial_deg: f64,
    pub to_from: ToFrom,
    /// Received signal strength, 0..=100 [%]
    pub signal_strength_pct: f64,
    pub glideslope: i32,
    pub glideslope_invalid: bool,
    pub dme_nm: Option<f64>,
    pub station_ident: Option<String>,
}

/// Both NAV radios for the navigator entity.
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavRadios {
    pub nav1: NavRadioData,
    pub nav2: NavRadioData,
}
