use navcore::{geo, NavigationSnapshot};

/// Assert that a snapshot is structurally sound whatever the navigation
/// state: needles inside their stops, courses normalized, distances finite.
#[track_caller]
pub fn assert_snapshot_valid(snapshot: &NavigationSnapshot) {
    assert!(
        (-127..=127).contains(&snapshot.cdi.deflection),
        "CDI deflection {} outside the needle stops",
        snapshot.cdi.deflection
    );
    assert!(
        (-119..=119).contains(&snapshot.cdi.glideslope),
        "glideslope {} outside the needle stops",
        snapshot.cdi.glideslope
    );
    assert!(
        snapshot.cdi.cross_track_nm.is_finite(),
        "cross-track error is not finite"
    );
    assert!(
        (0.0..360.0).contains(&snapshot.cdi.desired_track_deg),
        "desired track {} not normalized",
        snapshot.cdi.desired_track_deg
    );
    assert!(snapshot.map.range_nm > 0.0, "map range must be positive");

    if let Some(leg) = &snapshot.leg {
        assert!(
            leg.distance_nm.is_finite() && leg.distance_nm >= 0.0,
            "leg distance {} invalid",
            leg.distance_nm
        );
        assert!(
            (0.0..360.0).contains(&leg.bearing_deg),
            "bearing {} not normalized",
            leg.bearing_deg
        );
        assert!(
            leg.destination_distance_nm + 1e-9 >= leg.distance_nm,
            "destination cannot be closer than the active waypoint"
        );
        if let Some(ete) = leg.ete_s {
            assert!(ete >= 0.0, "negative ETE");
            assert!(leg.eta.is_some(), "ETE without ETA");
        }
    }
}

/// Assert that two courses agree modulo 360, within `epsilon` degrees.
#[track_caller]
pub fn assert_course_eq(actual_deg: f64, expected_deg: f64, epsilon: f64) {
    let diff = geo::wrap_180(actual_deg - expected_deg).abs();
    assert!(
        diff <= epsilon,
        "course {:.2} differs from {:.2} by {:.2} deg",
        actual_deg,
        expected_deg,
        diff
    );
}
