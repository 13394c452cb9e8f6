use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::waypoint::Waypoint;
use crate::geo;
use crate::resources::errors::{NavError, Result};

/// Direct-to overlay: replaces the active leg's target with an arbitrary
/// waypoint without touching the underlying plan order. The anchor is the
/// aircraft position at activation and serves as the leg's "from" end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectTo {
    pub target: Waypoint,
    pub anchor_lat: f64,
    pub anchor_lon: f64,
}

/// The active leg resolved for navigation: a "from" position and the
/// waypoint being flown to.
#[derive(Debug, Clone, Copy)]
pub struct ActiveLeg<'a> {
    /// Leg origin (lat, lon) [deg]: previous waypoint, direct-to anchor, or
    /// the aircraft position on the first leg
    pub from: (f64, f64),
    pub to: &'a Waypoint,
}

impl ActiveLeg<'_> {
    /// Desired track along the leg [deg true]. Falls back to the bearing
    /// from the aircraft when the leg is degenerate (from == to).
    pub fn desired_track_deg(&self) -> f64 {
        geo::initial_bearing_deg(self.from.0, self.from.1, self.to.lat, self.to.lon)
    }
}

/// Ordered waypoint sequence with the active-leg pointer.
///
/// Invariant: `0 <= active_index < waypoints.len()` whenever the plan is
/// non-empty; an empty plan has no active leg and navigation requests on it
/// return [`NavError::NoActivePlan`].
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightPlan {
    waypoints: Vec<Waypoint>,
    active_index: usize,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub cruise_altitude_ft: Option<f64>,
    direct_to: Option<DirectTo>,
}

impl FlightPlan {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        let mut plan = Self {
            waypoints,
            ..Default::default()
        };
        plan.recompute_leg_distances();
        plan
    }

    pub fn with_route(mut self, departure: impl Into<String>, arrival: impl Into<String>) -> Self {
        self.departure = Some(departure.into());
        self.arrival = Some(arrival.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn direct_to_overlay(&self) -> Option<&DirectTo> {
        self.direct_to.as_ref()
    }

    /// The waypoint navigation is currently flying to: the direct-to target
    /// when an overlay is active, otherwise the plan waypoint at the active
    /// index.
    pub fn active_waypoint(&self) -> Option<&Waypoint> {
        if let Some(dt) = &self.direct_to {
            return Some(&dt.target);
        }
        self.waypoints.get(self.active_index)
    }

    /// Resolves the active leg for an aircraft position.
    ///
    /// "From" is the previous plan waypoint; on the first leg (or under a
    /// direct-to overlay) it is the anchor/aircraft position instead.
    pub fn active_leg(&self, aircraft: (f64, f64)) -> Result<ActiveLeg<'_>> {
        if let Some(dt) = &self.direct_to {
            return Ok(ActiveLeg {
                from: (dt.anchor_lat, dt.anchor_lon),
                to: &dt.target,
            });
        }
        let to = self
            .waypoints
            .get(self.active_index)
            .ok_or(NavError::NoActivePlan)?;
        let from = if self.active_index == 0 {
            aircraft
        } else {
            self.waypoints[self.active_index - 1].position()
        };
        Ok(ActiveLeg { from, to })
    }

    /// Marks the active waypoint passed and advances the pointer.
    ///
    /// Returns the ident of the waypoint that was sequenced, or `None` when
    /// there was nothing to do (empty plan, or the final waypoint has
    /// already been passed).
    pub fn sequence(&mut self) -> Option<String> {
        let len = self.waypoints.len();
        let wp = self.waypoints.get_mut(self.active_index)?;
        if wp.passed {
            return None;
        }
        wp.passed = true;
        let ident = wp.ident.clone();
        if self.active_index + 1 < len {
            self.active_index += 1;
        }
        Some(ident)
    }

    /// Activates a direct-to overlay toward an arbitrary waypoint, anchored
    /// at the current aircraft position. Plan order is untouched.
    pub fn direct_to(&mut self, target: Waypoint, aircraft: (f64, f64)) -> Result<()> {
        if self.waypoints.is_empty() {
            return Err(NavError::NoActivePlan);
        }
        self.direct_to = Some(DirectTo {
            target,
            anchor_lat: aircraft.0,
            anchor_lon: aircraft.1,
        });
        Ok(())
    }

    /// Clears the direct-to overlay. When the target matched a plan
    /// waypoint, sequencing resumes at the waypoint after it; otherwise the
    /// pre-direct-to leg is resumed unchanged.
    pub fn complete_direct_to(&mut self) {
        let Some(dt) = self.direct_to.take() else {
            return;
        };
        if let Some(pos) = self.waypoints.iter().position(|w| w.ident == dt.target.ident) {
            for wp in &mut self.waypoints[..=pos] {
                wp.passed = true;
            }
            self.active_index = (pos + 1).min(self.waypoints.len().saturating_sub(1));
        }
    }

    pub fn cancel_direct_to(&mut self) {
        self.direct_to = None;
    }

    /// Replaces the waypoint list wholesale, resetting the active pointer
    /// and any direct-to overlay.
    pub fn set_waypoints(&mut self, waypoints: Vec<Waypoint>) {
        self.waypoints = waypoints;
        self.active_index = 0;
        self.direct_to = None;
        self.recompute_leg_distances();
    }

    /// Inserts a waypoint at `index` (clamped to the list length) and
    /// repairs the active pointer: inserting at or before the active leg
    /// shifts it forward so the same fix stays active.
    pub fn insert_waypoint(&mut self, index: usize, waypoint: Waypoint) {
        let index = index.min(self.waypoints.len());
        self.waypoints.insert(index, waypoint);
        if !self.waypoints.is_empty() && index <= self.active_index && self.waypoints.len() > 1 {
            self.active_index += 1;
        }
        self.recompute_leg_distances();
    }

    /// Removes the waypoint at `index`. Removing behind the active leg
    /// shifts the pointer back; removing the active waypoint retargets the
    /// one that followed it.
    pub fn remove_waypoint(&mut self, index: usize) -> Result<Waypoint> {
        if index >= self.waypoints.len() {
            return Err(NavError::NoActivePlan);
        }
        let removed = self.waypoints.remove(index);
        if index < self.active_index {
            self.active_index -= 1;
        }
        if !self.waypoints.is_empty() {
            self.active_index = self.active_index.min(self.waypoints.len() - 1);
        } else {
            self.active_index = 0;
        }
        self.recompute_leg_distances();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.active_index = 0;
        self.direct_to = None;
    }

    /// Sum of leg distances over the whole plan [nm].
    pub fn total_distance_nm(&self) -> f64 {
        self.waypoints
            .iter()
            .filter_map(|w| w.leg_distance_nm)
            .sum()
    }

    /// Distance from the aircraft to the destination along the remaining
    /// legs: aircraft → active waypoint, then leg distances to the end [nm].
    pub fn distance_remaining_nm(&self, aircraft: (f64, f64)) -> Option<f64> {
        let active = self.active_waypoint()?;
        let mut total =
            geo::haversine_distance_nm(aircraft.0, aircraft.1, active.lat, active.lon);
        if self.direct_to.is_none() {
            for wp in self.waypoints.iter().skip(self.active_index + 1) {
                total += wp.leg_distance_nm.unwrap_or(0.0);
            }
        }
        Some(total)
    }

    /// Distance from the aircraft to the destination (final) waypoint as the
    /// crow flies [nm]. Drives CDI sensitivity tiers.
    pub fn distance_to_destination_nm(&self, aircraft: (f64, f64)) -> Option<f64> {
        let dest = self.waypoints.last()?;
        Some(geo::haversine_distance_nm(
            aircraft.0, aircraft.1, dest.lat, dest.lon,
        ))
    }

    fn recompute_leg_distances(&mut self) {
        for i in 0..self.waypoints.len() {
            self.waypoints[i].leg_distance_nm = if i == 0 {
                None
            } else {
                let prev = self.waypoints[i - 1].position();
                let here = self.waypoints[i].position();
                Some(geo::haversine_distance_nm(prev.0, prev.1, here.0, here.1))
            };
        }
    }
}
