//! Wrapped geographic point from the `geo` crate.
//!
//! The directory speaks latitude-first (`lat, lon`) everywhere, while `geo`
//! stores `x = longitude, y = latitude`. `GeoPoint` hides that difference.

use serde::{Deserialize, Serialize};

/// A geographic point with latitude/longitude coordinates in degrees.
///
/// # Examples
///
/// ```
/// use orgdir_types::geo::GeoPoint;
///
/// let spb = GeoPoint::new(59.9343, 30.3351);
/// assert_eq!(spb.lat(), 59.9343);
/// assert_eq!(spb.lon(), 30.3351);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    inner: geo::Point<f64>,
}

impl GeoPoint {
    /// Create a point from latitude and longitude.
    ///
    /// Values are not range-checked here.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            inner: geo::Point::new(longitude, latitude),
        }
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.inner.y()
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.inner.x()
    }

    /// Access the inner `geo::Point` (x = longitude, y = latitude).
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }

    /// Convert into the inner `geo::Point`.
    #[inline]
    pub fn into_inner(self) -> geo::Point<f64> {
        self.inner
    }

    /// True when both coordinates are finite and inside the WGS84 ranges.
    #[inline]
    pub fn is_in_range(&self) -> bool {
        let (lat, lon) = (self.lat(), self.lon());
        lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(point: geo::Point<f64>) -> Self {
        Self { inner: point }
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        point.inner
    }
}

/// `(latitude, longitude)` tuple.
impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(point: GeoPoint) -> Self {
        (point.lat(), point.lon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_axis_order() {
        let point = GeoPoint::new(55.7558, 37.6173);
        assert_eq!(point.lat(), 55.7558);
        assert_eq!(point.lon(), 37.6173);
        assert_eq!(point.inner().x(), 37.6173);
        assert_eq!(point.inner().y(), 55.7558);
    }

    #[test]
    fn test_point_tuple_conversions() {
        let point: GeoPoint = (59.9343, 30.3351).into();
        let (lat, lon): (f64, f64) = point.into();
        assert_eq!(lat, 59.9343);
        assert_eq!(lon, 30.3351);
    }

    #[test]
    fn test_point_range() {
        assert!(GeoPoint::new(90.0, -180.0).is_in_range());
        assert!(!GeoPoint::new(90.5, 0.0).is_in_range());
        assert!(!GeoPoint::new(0.0, 181.0).is_in_range());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_in_range());
    }
}
