//! Region membership predicates.
//!
//! Both predicates accept any floating-point input and never fail.

use super::algorithms::distance_km;
use orgdir_types::geo::GeoPoint;
use orgdir_types::query::{RadiusQuery, RectangleQuery};

/// True iff `(lat, lon)` is within `radius_km` of the center. The boundary is inclusive.
///
/// # Examples
///
/// ```
/// use orgdir::compute::spatial::in_radius;
///
/// assert!(in_radius(0.0, 0.0, 100.0, 0.0, 0.0));
/// assert!(!in_radius(0.0, 0.0, 1.0, 10.0, 10.0));
/// ```
#[inline]
pub fn in_radius(center_lat: f64, center_lon: f64, radius_km: f64, lat: f64, lon: f64) -> bool {
    distance_km(center_lat, center_lon, lat, lon) <= radius_km
}

/// True iff `min_lat <= lat <= max_lat` and `min_lon <= lon <= max_lon`.
///
/// No antimeridian handling: a rectangle with `min_lon > max_lon` contains nothing.
///
/// # Examples
///
/// ```
/// use orgdir::compute::spatial::in_rectangle;
///
/// assert!(in_rectangle(0.0, 10.0, 0.0, 10.0, 5.0, 5.0));
/// assert!(in_rectangle(0.0, 10.0, 0.0, 10.0, 10.0, 10.0));
/// assert!(!in_rectangle(0.0, 10.0, 0.0, 10.0, 11.0, 5.0));
/// ```
#[inline]
pub fn in_rectangle(
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
    lat: f64,
    lon: f64,
) -> bool {
    min_lat <= lat && lat <= max_lat && min_lon <= lon && lon <= max_lon
}

/// A query region that can test point membership.
pub trait RegionQuery {
    fn contains(&self, point: &GeoPoint) -> bool;
}

impl RegionQuery for RadiusQuery {
    fn contains(&self, point: &GeoPoint) -> bool {
        in_radius(
            self.latitude,
            self.longitude,
            self.radius_km,
            point.lat(),
            point.lon(),
        )
    }
}

impl RegionQuery for RectangleQuery {
    fn contains(&self, point: &GeoPoint) -> bool {
        in_rectangle(
            self.min_lat,
            self.max_lat,
            self.min_lon,
            self.max_lon,
            point.lat(),
            point.lon(),
        )
    }
}
