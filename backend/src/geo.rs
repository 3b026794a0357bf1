use crate::models::Coordinate;

/// Mean earth radius used by every distance in the service.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters (haversine). Not rounded.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlng = (dlng / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Forward azimuth from `a` to `b` in degrees, normalized into `[0, 360)`.
///
/// The bearing between identical points is undefined; it is reported as 0.
pub fn initial_bearing_degrees(a: Coordinate, b: Coordinate) -> f64 {
    if a.lat == b.lat && a.lng == b.lng {
        return 0.0;
    }

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Rotation to apply to an arrow on a device facing `heading` so that it
/// points along `bearing`. Both inputs in degrees; result in `[0, 360)`.
pub fn relative_bearing_degrees(bearing: f64, heading: f64) -> f64 {
    normalize_degrees(bearing - heading)
}

fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELCOME_CENTER: Coordinate = Coordinate::new(41.126231, -73.8076645);
    const LIBRARY: Coordinate = Coordinate::new(41.1276482, -73.808836);

    #[test]
    fn test_distance_same_point() {
        assert_eq!(distance_meters(WELCOME_CENTER, WELCOME_CENTER), 0.0);
    }

    #[test]
    fn test_distance_symmetry() {
        assert_eq!(
            distance_meters(WELCOME_CENTER, LIBRARY),
            distance_meters(LIBRARY, WELCOME_CENTER)
        );
    }

    #[test]
    fn test_distance_known_campus_value() {
        // haversine with R = 6 371 000 m, computed independently
        let d = distance_meters(WELCOME_CENTER, LIBRARY);
        assert!((d - 185.637_306).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_distance_one_degree_of_longitude_at_equator() {
        let d = distance_meters(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111_194.926_6).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coordinate::new(0.0, 0.0);
        let cases = [
            (Coordinate::new(1.0, 0.0), 0.0),
            (Coordinate::new(0.0, 1.0), 90.0),
            (Coordinate::new(-1.0, 0.0), 180.0),
            (Coordinate::new(0.0, -1.0), 270.0),
        ];
        for (target, expected) in cases {
            let bearing = initial_bearing_degrees(origin, target);
            assert!((bearing - expected).abs() < 1e-9, "{target:?}: {bearing}");
        }
    }

    #[test]
    fn test_bearing_campus_library_is_north_west() {
        let bearing = initial_bearing_degrees(WELCOME_CENTER, LIBRARY);
        assert!((bearing - 328.091_41).abs() < 1e-3, "got {bearing}");
    }

    #[test]
    fn test_bearing_same_point_is_zero() {
        assert_eq!(initial_bearing_degrees(LIBRARY, LIBRARY), 0.0);
    }

    #[test]
    fn test_relative_bearing_wraps() {
        assert_eq!(relative_bearing_degrees(10.0, 350.0), 20.0);
        assert_eq!(relative_bearing_degrees(350.0, 10.0), 340.0);
        assert_eq!(relative_bearing_degrees(90.0, 90.0), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-90.0..=90.0, -180.0..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
        }

        proptest! {
            #[test]
            fn prop_distance_non_negative(a in valid_coord(), b in valid_coord()) {
                prop_assert!(distance_meters(a, b) >= 0.0);
            }

            #[test]
            fn prop_distance_symmetric(a in valid_coord(), b in valid_coord()) {
                prop_assert_eq!(distance_meters(a, b), distance_meters(b, a));
            }

            #[test]
            fn prop_distance_same_point_is_zero(coord in valid_coord()) {
                prop_assert_eq!(distance_meters(coord, coord), 0.0);
            }

            #[test]
            fn prop_distance_bounded_by_half_circumference(a in valid_coord(), b in valid_coord()) {
                let max_distance = std::f64::consts::PI * EARTH_RADIUS_M;
                prop_assert!(distance_meters(a, b) <= max_distance + 1e-3);
            }

            #[test]
            fn prop_bearing_in_range(a in valid_coord(), b in valid_coord()) {
                prop_assume!(a != b);
                let bearing = initial_bearing_degrees(a, b);
                prop_assert!((0.0..360.0).contains(&bearing), "bearing {}", bearing);
            }

            #[test]
            fn prop_relative_bearing_in_range(
                bearing in -720.0..720.0f64,
                heading in -720.0..720.0f64,
            ) {
                let angle = relative_bearing_degrees(bearing, heading);
                prop_assert!((0.0..360.0).contains(&angle), "angle {}", angle);
            }
        }
    }
}
