use bevy::prelude::*;

use crate::components::waypoint::Waypoint;

/// Fired by the sequencing system when the aircraft crosses a waypoint (or
/// completes a direct-to). The map controller releases its zoom override on
/// it, and the holding engine activates a hold published at the crossed
/// fix.
#[derive(Event, Debug, Clone)]
pub struct WaypointSequenced {
    /// The waypoint that was just crossed
    pub waypoint: Waypoint,
    /// Identifier of the fix navigation now proceeds to, if any
    pub next_ident: Option<String>,
}
