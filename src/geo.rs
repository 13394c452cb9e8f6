use nalgebra::Vector2;

/// Mean Earth radius in nautical miles, used for all great-circle math.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// WGS84 equatorial radius in metres, used by the Web Mercator projection
/// (EPSG:3857 treats the Earth as a sphere of this radius).
pub const MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection. `tan(π/4 + φ/2)` diverges
/// toward the poles, so inputs are clamped here and the projection saturates.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.05112878;

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_360(angle_deg: f64) -> f64 {
    angle_deg.rem_euclid(360.0)
}

/// Wraps an angle in degrees into `(-180, 180]`.
pub fn wrap_180(angle_deg: f64) -> f64 {
    let a = angle_deg.rem_euclid(360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Great-circle distance between two positions using the haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - Start position in degrees
/// * `lat2`, `lon2` - End position in degrees
///
/// # Returns
/// Distance in nautical miles. Always non-negative, 0 for identical points.
pub fn haversine_distance_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_NM * c
}

/// Initial great-circle bearing from the first position toward the second.
///
/// # Returns
/// Bearing in degrees, `[0, 360)`, 0 = true north.
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();

    wrap_360(y.atan2(x).to_degrees())
}

/// Great-circle destination point: start position projected along a bearing
/// for a given distance. Used for track vectors and runway extensions.
///
/// # Returns
/// `(lat, lon)` in degrees, longitude wrapped into `(-180, 180]`.
pub fn project_position(lat: f64, lon: f64, bearing_deg: f64, distance_nm: f64) -> (f64, f64) {
    let delta = distance_nm / EARTH_RADIUS_NM;
    let theta = bearing_deg.to_radians();
    let phi1 = lat.to_radians();
    let lambda1 = lon.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    (phi2.to_degrees(), wrap_180(lambda2.to_degrees()))
}

/// Signed cross-track error of a position relative to a course line.
///
/// The course line passes through (`from_lat`, `from_lon`) with direction
/// `desired_track_deg`. Positive = right of course when looking along it.
/// A position on top of the line origin returns 0 (degenerate leg guard).
pub fn cross_track_error_nm(
    from_lat: f64,
    from_lon: f64,
    lat: f64,
    lon: f64,
    desired_track_deg: f64,
) -> f64 {
    let dist = haversine_distance_nm(from_lat, from_lon, lat, lon);
    if dist == 0.0 {
        return 0.0;
    }
    let bearing = initial_bearing_deg(from_lat, from_lon, lat, lon);
    dist * wrap_180(bearing - desired_track_deg).to_radians().sin()
}

fn mercator_y_m(lat_deg: f64) -> f64 {
    let lat = lat_deg
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    MERCATOR_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln()
}

/// Web Mercator (EPSG:3857) planar projection centered on a reference point.
///
/// # Arguments
/// * `lat`, `lon` - Position to project, degrees
/// * `center_lat`, `center_lon` - Projection center, degrees
/// * `scale` - Multiplier applied to the metre-valued plane coordinates
///
/// # Returns
/// Planar offset from the center; x grows east, y grows north. Latitudes
/// beyond ±85.05° saturate to the projection limit instead of diverging.
pub fn project_mercator(
    lat: f64,
    lon: f64,
    center_lat: f64,
    center_lon: f64,
    scale: f64,
) -> Vector2<f64> {
    let x = MERCATOR_RADIUS_M * wrap_180(lon - center_lon).to_radians();
    let y = mercator_y_m(lat) - mercator_y_m(center_lat);
    Vector2::new(x * scale, y * scale)
}

/// Inverse of [`project_mercator`]: recovers `(lat, lon)` from a planar
/// offset, given the same center and scale. Round-trips within floating-point
/// tolerance for |lat| < 85°.
pub fn unproject_mercator(
    point: Vector2<f64>,
    center_lat: f64,
    center_lon: f64,
    scale: f64,
) -> (f64, f64) {
    let x_m = point.x / scale;
    let y_m = point.y / scale + mercator_y_m(center_lat);

    let lon = center_lon + (x_m / MERCATOR_RADIUS_M).to_degrees();
    let lat =
        (2.0 * (y_m / MERCATOR_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();

    (lat, wrap_180(lon))
}

/// Maps a heading to the equivalent upright-text angle in `[-90, 90]` so map
/// labels are never rendered upside-down: reduce into `(-180, 180]`, then
/// fold anything outside `(-90, 90]` by 180°.
pub fn normalize_heading_for_text(angle_deg: f64) -> f64 {
    let mut a = wrap_180(angle_deg);
    if a > 90.0 {
        a -= 180.0;
    } else if a <= -90.0 {
        a += 180.0;
    }
    a
}

/// Linear needle scaling: maps a signed value against its full-scale
/// magnitude into CDI needle units, saturating at ±127.
pub fn clamp_needle(value: f64, full_scale: f64) -> i32 {
    if full_scale <= 0.0 {
        return 0;
    }
    (value / full_scale * 127.0).round().clamp(-127.0, 127.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_haversine_identical_points() {
        assert_eq!(haversine_distance_nm(47.0, -122.0, 47.0, -122.0), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        // One degree of latitude along a meridian is one sixtieth of a
        // quarter circle: R * π/180 ≈ 60.04 nm.
        let d = haversine_distance_nm(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(d, EARTH_RADIUS_NM * std::f64::consts::PI / 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        assert_relative_eq!(initial_bearing_deg(35.0, 139.0, 36.0, 139.0), 0.0, epsilon = 1e-6);
        assert_relative_eq!(initial_bearing_deg(0.0, 0.0, 0.0, 1.0), 90.0, epsilon = 1e-6);
        assert_relative_eq!(initial_bearing_deg(36.0, 139.0, 35.0, 139.0), 180.0, epsilon = 1e-6);
        assert_relative_eq!(initial_bearing_deg(0.0, 1.0, 0.0, 0.0), 270.0, epsilon = 1e-6);
    }

    #[test]
    fn test_wrap_360() {
        assert_relative_eq!(wrap_360(370.0), 10.0);
        assert_relative_eq!(wrap_360(-10.0), 350.0);
        assert_relative_eq!(wrap_360(360.0), 0.0);
    }

    #[test]
    fn test_wrap_180() {
        assert_relative_eq!(wrap_180(270.0), -90.0);
        assert_relative_eq!(wrap_180(-270.0), 90.0);
        assert_relative_eq!(wrap_180(180.0), 180.0);
        assert_relative_eq!(wrap_180(-180.0), 180.0);
    }

    #[test]
    fn test_project_position_round_trip() {
        let (lat, lon) = project_position(40.0, -105.0, 137.0, 25.0);
        let back = haversine_distance_nm(40.0, -105.0, lat, lon);
        assert_relative_eq!(back, 25.0, epsilon = 1e-6);
        let bearing = initial_bearing_deg(40.0, -105.0, lat, lon);
        assert_relative_eq!(bearing, 137.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cross_track_sign_convention() {
        // Course due north from the origin. A point east of the line is
        // right of course and must read positive.
        let right = cross_track_error_nm(0.0, 0.0, 0.5, 0.1, 0.0);
        let left = cross_track_error_nm(0.0, 0.0, 0.5, -0.1, 0.0);
        assert!(right > 0.0, "east of a northbound course should be positive");
        assert!(left < 0.0, "west of a northbound course should be negative");
    }

    #[test]
    fn test_cross_track_on_course_is_zero() {
        let xtk = cross_track_error_nm(10.0, 20.0, 12.0, 20.0, 0.0);
        assert_relative_eq!(xtk, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cross_track_degenerate_leg() {
        assert_eq!(cross_track_error_nm(10.0, 20.0, 10.0, 20.0, 45.0), 0.0);
    }

    #[test]
    fn test_mercator_round_trip() {
        let cases = [
            (0.0, 0.0),
            (47.4502, -122.3088),
            (-33.9461, 151.1772),
            (84.9, 10.0),
            (-84.9, -170.0),
        ];
        for (lat, lon) in cases {
            let p = project_mercator(lat, lon, 45.0, -120.0, 1.0);
            let (lat2, lon2) = unproject_mercator(p, 45.0, -120.0, 1.0);
            assert_relative_eq!(lat, lat2, epsilon = 1e-9);
            assert_relative_eq!(lon, lon2, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_mercator_saturates_near_poles() {
        let p = project_mercator(89.9999, 0.0, 0.0, 0.0, 1.0);
        assert!(p.y.is_finite(), "polar projection must saturate, not diverge");
        let limit = project_mercator(MERCATOR_MAX_LAT_DEG, 0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.y, limit.y, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_heading_for_text() {
        assert_relative_eq!(normalize_heading_for_text(0.0), 0.0);
        assert_relative_eq!(normalize_heading_for_text(45.0), 45.0);
        assert_relative_eq!(normalize_heading_for_text(90.0), 90.0);
        assert_relative_eq!(normalize_heading_for_text(91.0), -89.0);
        assert_relative_eq!(normalize_heading_for_text(180.0), 0.0);
        assert_relative_eq!(normalize_heading_for_text(270.0), 90.0);
        assert_relative_eq!(normalize_heading_for_text(359.0), -1.0);
    }

    #[test]
    fn test_clamp_needle_linear_and_saturating() {
        assert_eq!(clamp_needle(0.0, 5.0), 0);
        assert_eq!(clamp_needle(2.5, 5.0), 64); // round(63.5)
        assert_eq!(clamp_needle(5.0, 5.0), 127);
        assert_eq!(clamp_needle(7.5, 5.0), 127);
        assert_eq!(clamp_needle(-7.5, 5.0), -127);
        assert_eq!(clamp_needle(-1.0, 5.0), -25);
    }

    #[test]
    fn test_clamp_needle_degenerate_scale() {
        assert_eq!(clamp_needle(1.0, 0.0), 0);
    }
}
