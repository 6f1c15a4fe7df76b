//! Great-circle distance.

use orgdir_types::geo::GeoPoint;

/// Earth radius used by every distance in the directory, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two latitude/longitude pairs, in kilometers.
///
/// Inputs are degrees and are not range-checked: out-of-range values give a
/// defined but meaningless number rather than an error.
///
/// # Examples
///
/// ```
/// use orgdir::compute::spatial::distance_km;
///
/// let km = distance_km(55.7558, 37.6173, 59.9343, 30.3351);
/// assert!((km - 634.0).abs() < 5.0); // Moscow - St. Petersburg
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let half_dlat = (dlat / 2.0).sin();
    let half_dlon = (dlon / 2.0).sin();

    let a = half_dlat * half_dlat
        + lat1.to_radians().cos() * lat2.to_radians().cos() * half_dlon * half_dlon;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// [`distance_km`] between two points.
#[inline]
pub fn distance_between(point1: &GeoPoint, point2: &GeoPoint) -> f64 {
    distance_km(point1.lat(), point1.lon(), point2.lat(), point2.lon())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOSCOW: (f64, f64) = (55.7558, 37.6173);
    const ST_PETERSBURG: (f64, f64) = (59.9343, 30.3351);

    #[test]
    fn test_identical_points() {
        assert_eq!(distance_km(MOSCOW.0, MOSCOW.1, MOSCOW.0, MOSCOW.1), 0.0);
        assert_eq!(distance_km(-33.9, 151.2, -33.9, 151.2), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let forward = distance_km(MOSCOW.0, MOSCOW.1, ST_PETERSBURG.0, ST_PETERSBURG.1);
        let backward = distance_km(ST_PETERSBURG.0, ST_PETERSBURG.1, MOSCOW.0, MOSCOW.1);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_moscow_st_petersburg() {
        let km = distance_km(MOSCOW.0, MOSCOW.1, ST_PETERSBURG.0, ST_PETERSBURG.1);
        assert!((km - 634.0).abs() <= 5.0, "got {km}");
    }

    #[test]
    fn test_monotonic_along_meridian() {
        let mut previous = 0.0;
        for step in 1..=18 {
            let km = distance_km(0.0, 0.0, step as f64 * 5.0, 0.0);
            assert!(km > previous);
            previous = km;
        }
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let km = distance_km(0.0, 0.0, 1.0, 0.0);
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((km - expected).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal_points() {
        let km = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!((km - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_agrees_with_geo_haversine() {
        use geo::{Distance, Haversine};

        let a = GeoPoint::new(MOSCOW.0, MOSCOW.1);
        let b = GeoPoint::new(ST_PETERSBURG.0, ST_PETERSBURG.1);

        let ours = distance_between(&a, &b);
        let theirs_km = Haversine.distance(a.into_inner(), b.into_inner()) / 1000.0;

        // geo uses the 6371.0088 km mean radius, so only the ratio may differ.
        assert!((ours - theirs_km).abs() / theirs_km < 1e-5);
    }

    #[test]
    fn test_out_of_range_input_is_defined() {
        let km = distance_km(120.0, 400.0, -95.0, -200.0);
        assert!(km.is_finite());
        assert!(km >= 0.0);
    }
}
