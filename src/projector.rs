//! Equirectangular projection of geographic coordinates.
//!
//! Maps latitude/longitude onto a normalized 2D plane for placing city
//! markers on the world-map panel. This is a plain linear mapping, not
//! Mercator: x runs with longitude, y runs top-down with latitude.

/// Projects (lat, lng) in degrees to (x, y) percentages of the map plane.
///
/// `x = (lng + 180) / 360 * 100`, `y = (90 - lat) / 180 * 100`, so
/// (90, -180) is the top-left corner and (-90, 180) the bottom-right.
/// The (0, 0) detected-location sentinel lands harmlessly at the center.
#[must_use]
pub fn project(lat: f64, lng: f64) -> (f64, f64) {
    let x = (lng + 180.0) / 360.0 * 100.0;
    let y = (90.0 - lat) / 180.0 * 100.0;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_origin_maps_to_center() {
        assert_close(project(0.0, 0.0), (50.0, 50.0));
    }

    #[test]
    fn test_corners() {
        assert_close(project(90.0, -180.0), (0.0, 0.0));
        assert_close(project(-90.0, 180.0), (100.0, 100.0));
    }

    #[test]
    fn test_known_city() {
        // London: 51.5074 N, 0.1278 W sits just left of center, upper half
        let (x, y) = project(51.5074, -0.1278);
        assert!(x < 50.0 && x > 49.9);
        assert!(y < 50.0);
    }

    #[test]
    fn test_southern_hemisphere_below_center() {
        let (_, y) = project(-33.8688, 151.2093); // Sydney
        assert!(y > 50.0);
    }
}
