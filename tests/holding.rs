mod common;

use approx::assert_relative_eq;
use navcore::components::HoldLeg;
use navcore::{
    HoldDefinition, HoldEntry, NavError, NavigationComputer, TelemetryFrame, TurnDirection,
    Waypoint,
};

use crate::common::{
    assert_course_eq, assert_snapshot_valid, computer_on_route, frame_at_time,
    route_with_hold_at_bravo, sample_at_time,
};

#[test]
fn test_hold_activates_with_direct_entry() {
    let mut computer = NavigationComputer::new();
    computer.set_flight_plan(route_with_hold_at_bravo()).unwrap();
    computer.tick(frame_at_time(47.0, -122.3, 0));

    // Northbound arrival inside the widened hold radius of BRAVO. The fix
    // still sequences, then the racetrack takes over.
    let snapshot = computer.tick(frame_at_time(47.47, -122.3, 600));

    assert!(snapshot.obs.hold_active);
    assert!(snapshot.obs.suspended);
    assert_eq!(snapshot.obs.entry, HoldEntry::Direct);
    assert_eq!(snapshot.obs.current_leg, HoldLeg::Outbound);
    assert_eq!(snapshot.obs.hold_fix.as_ref().unwrap().ident, "BRAVO");
    assert_eq!(computer.flight_plan().active_index(), 2);
}

#[test]
fn test_entry_classified_from_arrival_track() {
    let mut computer = NavigationComputer::new();
    computer.set_flight_plan(route_with_hold_at_bravo()).unwrap();
    computer.tick(frame_at_time(47.0, -122.3, 0));

    // Arriving on a southeasterly track against a 360 inbound course.
    let mut sample = sample_at_time(47.47, -122.3, 600);
    sample.track_deg = 150.0;
    let snapshot = computer.tick(TelemetryFrame::new(sample));

    assert!(snapshot.obs.hold_active);
    assert_eq!(snapshot.obs.entry, HoldEntry::Teardrop);
}

#[test]
fn test_entry_mirrors_for_left_turn_holds() {
    let mut computer = NavigationComputer::new();
    let route = vec![
        Waypoint::new("ALPHA", 47.0, -122.3),
        Waypoint::new("BRAVO", 47.5, -122.3)
            .with_hold(HoldDefinition::new(360.0, TurnDirection::Left)),
        Waypoint::new("CHRLY", 48.0, -122.3),
    ];
    computer.set_flight_plan(route).unwrap();
    computer.tick(frame_at_time(47.0, -122.3, 0));

    let mut sample = sample_at_time(47.47, -122.3, 600);
    sample.track_deg = 150.0;
    let snapshot = computer.tick(TelemetryFrame::new(sample));

    // The same arrival track that reads Teardrop in a right hold.
    assert_eq!(snapshot.obs.entry, HoldEntry::Parallel);
}

#[test]
fn test_timed_racetrack_and_pilot_exit() {
    let mut computer = NavigationComputer::new();
    computer.set_flight_plan(route_with_hold_at_bravo()).unwrap();
    computer.tick(frame_at_time(47.0, -122.3, 0));
    computer.tick(frame_at_time(47.47, -122.3, 600));

    // Outbound is flown on the telemetry clock.
    let outbound = computer.tick(frame_at_time(47.46, -122.3, 630));
    assert_eq!(outbound.obs.current_leg, HoldLeg::Outbound);
    assert_relative_eq!(outbound.obs.outbound_elapsed_s, 30.0, epsilon = 0.01);

    // Leg time expires: inbound, with guidance on the inbound course.
    let inbound = computer.tick(frame_at_time(47.44, -122.3, 661));
    assert_eq!(inbound.obs.current_leg, HoldLeg::Inbound);
    assert_course_eq(inbound.cdi.desired_track_deg, 0.0, 0.1);
    assert_relative_eq!(inbound.cdi.cross_track_nm, 0.0, epsilon = 0.02);

    // Fix crossing completes the lap and turns outbound again.
    let lap = computer.tick(frame_at_time(47.4999, -122.3, 780));
    assert_eq!(lap.obs.laps_completed, 1);
    assert_eq!(lap.obs.current_leg, HoldLeg::Outbound);

    // Pilot exit is honored at the next fix crossing, not immediately.
    computer.exit_hold();
    let still = computer.tick(frame_at_time(47.47, -122.3, 810));
    assert!(still.obs.hold_active);
    assert!(still.obs.suspended);
    let turning = computer.tick(frame_at_time(47.45, -122.3, 845));
    assert!(turning.obs.hold_active);
    let closing = computer.tick(frame_at_time(47.47, -122.3, 880));
    assert_eq!(closing.obs.current_leg, HoldLeg::Inbound);

    let released = computer.tick(frame_at_time(47.4999, -122.3, 940));
    assert!(!released.obs.hold_active);
    assert!(!released.obs.suspended);

    // Sequencing is live again on the leg to CHRLY.
    let resumed = computer.tick(frame_at_time(47.52, -122.3, 960));
    assert_snapshot_valid(&resumed);
    assert_eq!(resumed.leg.unwrap().to_ident, "CHRLY");
}

#[test]
fn test_lap_limit_exits_automatically() {
    let mut computer = NavigationComputer::new();
    let route = vec![
        Waypoint::new("ALPHA", 47.0, -122.3),
        Waypoint::new("BRAVO", 47.5, -122.3).with_hold(
            HoldDefinition::new(360.0, TurnDirection::Right)
                .with_leg_time(30.0)
                .with_max_laps(1),
        ),
        Waypoint::new("CHRLY", 48.0, -122.3),
    ];
    computer.set_flight_plan(route).unwrap();
    computer.tick(frame_at_time(47.0, -122.3, 0));
    computer.tick(frame_at_time(47.47, -122.3, 600));

    let inbound = computer.tick(frame_at_time(47.44, -122.3, 631));
    assert_eq!(inbound.obs.current_leg, HoldLeg::Inbound);

    // First fix crossing reaches the lap limit and clears the hold.
    let done = computer.tick(frame_at_time(47.4999, -122.3, 700));
    assert!(!done.obs.hold_active);
    assert!(!done.obs.suspended);
    assert_eq!(computer.flight_plan().active_index(), 2);
}

#[test]
fn test_commanded_hold_at_active_waypoint() {
    let mut computer = NavigationComputer::new();
    let err = computer
        .activate_hold(HoldDefinition::new(90.0, TurnDirection::Right))
        .unwrap_err();
    assert!(matches!(err, NavError::NoActivePlan));

    let mut computer = computer_on_route();
    computer
        .activate_hold(HoldDefinition::new(90.0, TurnDirection::Right))
        .unwrap();
    let snapshot = computer.tick(frame_at_time(46.9, -122.3, 0));

    assert!(snapshot.obs.hold_active);
    assert!(snapshot.obs.suspended);
    assert_eq!(snapshot.obs.hold_fix.as_ref().unwrap().ident, "ALPHA");
    // Northbound against a 090 inbound course.
    assert_eq!(snapshot.obs.entry, HoldEntry::Parallel);
}

#[test]
fn test_invalid_hold_definitions_rejected() {
    let mut computer = NavigationComputer::new();
    let malformed = HoldDefinition {
        inbound_course_deg: None,
        turn: TurnDirection::Right,
        leg_time_s: None,
        max_laps: None,
    };
    let route = vec![
        Waypoint::new("ALPHA", 47.0, -122.3),
        Waypoint::new("BRAVO", 47.5, -122.3).with_hold(malformed),
    ];
    let err = computer.set_flight_plan(route).unwrap_err();
    assert!(matches!(err, NavError::InvalidHoldDefinition(_)));
    assert!(computer.flight_plan().is_empty(), "rejected plan not applied");

    let mut computer = computer_on_route();
    let too_short = HoldDefinition::new(90.0, TurnDirection::Right).with_leg_time(5.0);
    assert!(computer.activate_hold(too_short).is_err());

    let not_finite = HoldDefinition::new(f64::NAN, TurnDirection::Right);
    assert!(computer.activate_hold(not_finite).is_err());
}

#[test]
fn test_hold_suspends_sequencing_until_exit() {
    let mut computer = NavigationComputer::new();
    computer.set_flight_plan(route_with_hold_at_bravo()).unwrap();
    computer.tick(frame_at_time(47.0, -122.3, 0));
    computer.tick(frame_at_time(47.47, -122.3, 600));

    // Orbit the fix, crossing it while still outbound: nothing sequences.
    for (i, lat) in [47.5, 47.46, 47.52, 47.48].into_iter().enumerate() {
        let snapshot = computer.tick(frame_at_time(lat, -122.3, 610 + 10 * i as i64));
        assert!(snapshot.obs.suspended);
    }

    let plan = computer.flight_plan();
    assert_eq!(plan.active_index(), 2);
    assert!(plan.waypoints()[1].passed, "hold fix itself did sequence");
    assert!(!plan.waypoints()[2].passed);
}
