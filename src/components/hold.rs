use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resources::errors::{NavError, Result};

/// Racetrack turn direction. Standard holds turn right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    Left,
    Right,
}

impl Default for TurnDirection {
    fn default() -> Self {
        TurnDirection::Right
    }
}

/// Standard 3-sector hold entry geometry, plus `Unknown` for the idle state
/// before any hold has been activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldEntry {
    Direct,
    Teardrop,
    Parallel,
    Unknown,
}

impl Default for HoldEntry {
    fn default() -> Self {
        HoldEntry::Unknown
    }
}

/// Which leg of the racetrack is currently being flown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldLeg {
    Inbound,
    Outbound,
}

impl Default for HoldLeg {
    fn default() -> Self {
        HoldLeg::Inbound
    }
}

/// A hold as published or entered by the pilot: inbound course to the fix,
/// turn direction, and optional timing overrides. The inbound course may be
/// absent in a malformed definition; activation rejects it rather than
/// guessing an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldDefinition {
    /// Course TO the fix on the inbound leg [deg]
    pub inbound_course_deg: Option<f64>,
    pub turn: TurnDirection,
    /// Outbound leg time [s]; engine default applies when absent
    pub leg_time_s: Option<f64>,
    /// Automatic exit after this many complete laps; none = hold until command
    pub max_laps: Option<u32>,
}

impl HoldDefinition {
    pub fn new(inbound_course_deg: f64, turn: TurnDirection) -> Self {
        Self {
            inbound_course_deg: Some(inbound_course_deg),
            turn,
            leg_time_s: None,
            max_laps: None,
        }
    }

    pub fn with_leg_time(mut self, leg_time_s: f64) -> Self {
        self.leg_time_s = Some(leg_time_s);
        self
    }

    pub fn with_max_laps(mut self, laps: u32) -> Self {
        self.max_laps = Some(laps);
        self
    }

    /// Checks the definition against the allowed leg-time envelope and
    /// returns the resolved (course, leg time). Rejects a missing or
    /// non-finite inbound course and an out-of-envelope leg time.
    pub fn resolve(&self, default_leg_time_s: f64, min_s: f64, max_s: f64) -> Result<(f64, f64)> {
        let course = match self.inbound_course_deg {
            Some(c) if c.is_finite() => c,
            Some(c) => {
                return Err(NavError::InvalidHoldDefinition(format!(
                    "inbound course is not finite: {}",
                    c
                )))
            }
            None => {
                return Err(NavError::InvalidHoldDefinition(
                    "missing inbound course".to_string(),
                ))
            }
        };
        let leg_time = self.leg_time_s.unwrap_or(default_leg_time_s);
        if !(min_s..=max_s).contains(&leg_time) {
            return Err(NavError::InvalidHoldDefinition(format!(
                "leg time {}s outside {}..{}s",
                leg_time, min_s, max_s
            )));
        }
        Ok((course, leg_time))
    }
}

/// The fix a hold is anchored at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldFix {
    pub ident: String,
    pub lat: f64,
    pub lon: f64,
}

/// OBS and holding-pattern state for the navigator.
///
/// The entry type is computed once when a hold activates and never
/// recomputed mid-hold; the outbound timer is derived from telemetry
/// timestamps, not wall clock.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObsState {
    /// OBS mode selected (manual course through the active waypoint)
    pub active: bool,
    /// Pilot-selected OBS course [deg]
    pub course_deg: f64,
    /// Automatic waypoint sequencing suspended
    pub suspended: bool,
    pub hold_active: bool,
    /// Outbound leg time for the active hold [s]
    pub leg_time_s: f64,
    pub turn: TurnDirection,
    pub entry: HoldEntry,
    pub current_leg: HoldLeg,
    /// Elapsed time in the current outbound leg [s]
    pub outbound_elapsed_s: f64,
    /// Inbound course of the active hold [deg]
    pub hold_course_deg: f64,
    /// The fix being held at
    pub hold_fix: Option<HoldFix>,
    /// Pilot has requested exit; honored at the next fix crossing
    pub exit_armed: bool,
    pub laps_completed: u32,
    /// Automatic exit lap limit carried from the definition
    pub max_laps: Option<u32>,
    /// Telemetry timestamp at which the current leg began
    pub leg_started_at: Option<DateTime<Utc>>,
}

impl Default for ObsState {
    fn default() -> Self {
        Self {
            active: false,
            course_deg: 0.0,
            suspended: false,
            hold_active: false,
            leg_time_s: 60.0,
            turn: TurnDirection::Right,
            entry: HoldEntry::Unknown,
            current_leg: HoldLeg::Inbound,
            outbound_elapsed_s: 0.0,
            hold_course_deg: 0.0,
            hold_fix: None,
            exit_armed: false,
            laps_completed: 0,
            max_laps: None,
            leg_started_at: None,
        }
    }
}

impl ObsState {
    /// Arms a validated hold at a fix. The entry type stays `Unknown` until
    /// the engine classifies it from the first telemetry sample after
    /// activation, and is then never recomputed for this hold.
    pub fn activate_hold(
        &mut self,
        fix: HoldFix,
        inbound_course_deg: f64,
        leg_time_s: f64,
        turn: TurnDirection,
        max_laps: Option<u32>,
    ) {
        self.hold_active = true;
        self.suspended = true;
        self.hold_fix = Some(fix);
        self.hold_course_deg = inbound_course_deg;
        self.leg_time_s = leg_time_s;
        self.turn = turn;
        self.max_laps = max_laps;
        self.entry = HoldEntry::Unknown;
        self.current_leg = HoldLeg::Outbound;
        self.outbound_elapsed_s = 0.0;
        self.exit_armed = false;
        self.laps_completed = 0;
        self.leg_started_at = None;
    }

    /// Clears all holding-pattern state, leaving OBS course selection alone.
    /// Sequencing resumes unless OBS mode itself is holding it suspended.
    pub fn clear_hold(&mut self) {
        self.hold_active = false;
        self.suspended = self.active;
        self.entry = HoldEntry::Unknown;
        self.current_leg = HoldLeg::Inbound;
        self.outbound_elapsed_s = 0.0;
        self.hold_fix = None;
        self.exit_armed = false;
        self.laps_completed = 0;
        self.max_laps = None;
        self.leg_started_at = None;
    }

    /// Begins a leg at the given telemetry timestamp.
    pub fn start_leg(&mut self, leg: HoldLeg, at: DateTime<Utc>) {
        self.current_leg = leg;
        self.outbound_elapsed_s = 0.0;
        self.leg_started_at = Some(at);
    }
}
