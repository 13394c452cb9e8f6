use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::telemetry::TelemetrySample;

/// Fixed navigation constants for one navigator instance.
///
/// These mirror the behavior of the modeled unit; they are configurable so
/// a certified value (e.g. a different approach full-scale) can be swapped
/// in without code changes.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Sequencing radius around an ordinary waypoint [nm]
    pub sequence_radius_nm: f64,
    /// Sequencing/arrival radius around a fix with a published hold [nm]
    pub hold_sequence_radius_nm: f64,
    /// En-route CDI full-scale deflection [nm]
    pub enroute_full_scale_nm: f64,
    /// Terminal CDI full-scale deflection [nm]
    pub terminal_full_scale_nm: f64,
    /// Approach CDI full-scale deflection [nm]
    pub approach_full_scale_nm: f64,
    /// Distance to destination below which the terminal tier applies [nm]
    pub terminal_distance_nm: f64,
    /// Default hold outbound leg time [s]
    pub hold_leg_time_s: f64,
    /// Minimum allowed hold leg time [s]
    pub hold_leg_time_min_s: f64,
    /// Maximum allowed hold leg time [s]
    pub hold_leg_time_max_s: f64,
    /// Ground speed below which the track vector is suppressed [kt]
    pub track_vector_min_speed_kt: f64,
    /// Length of the extended runway centerline [nm]
    pub runway_extension_nm: f64,
    /// VNAV descent path angle [deg]
    pub vnav_path_angle_deg: f64,
    /// Vertical deviation that pegs the glidepath needle [ft]
    pub vnav_full_scale_ft: f64,
    /// Ground speed below which ETE/ETA are not computed [kt]
    pub ete_min_speed_kt: f64,
    /// Output courses referenced to magnetic north instead of true
    pub magnetic_courses: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            sequence_radius_nm: 0.5,
            hold_sequence_radius_nm: 2.0,
            enroute_full_scale_nm: 5.0,
            terminal_full_scale_nm: 1.0,
            approach_full_scale_nm: 0.3,
            terminal_distance_nm: 30.0,
            hold_leg_time_s: 60.0,
            hold_leg_time_min_s: 30.0,
            hold_leg_time_max_s: 240.0,
            track_vector_min_speed_kt: 30.0,
            runway_extension_nm: 5.0,
            vnav_path_angle_deg: 3.0,
            vnav_full_scale_ft: 500.0,
            ete_min_speed_kt: 5.0,
            magnetic_courses: true,
        }
    }
}

impl NavConfig {
    /// Interprets a pilot- or database-entered course against the
    /// configured reference, returning degrees true for geometry.
    pub fn course_to_true(&self, sample: &TelemetrySample, course_deg: f64) -> f64 {
        if self.magnetic_courses {
            sample.to_true_deg(course_deg)
        } else {
            course_deg
        }
    }

    /// Converts a true course to the configured output reference.
    pub fn course_to_output(&self, sample: &TelemetrySample, true_deg: f64) -> f64 {
        if self.magnetic_courses {
            sample.to_magnetic_deg(true_deg)
        } else {
            crate::geo::wrap_360(true_deg)
        }
    }
}
