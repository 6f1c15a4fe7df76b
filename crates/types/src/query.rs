//! Region query parameters.
//!
//! Field names match the request bodies of the HTTP boundary.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Circular region around a center point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl RadiusQuery {
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km,
        }
    }

    #[inline]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Axis-aligned latitude/longitude rectangle, inclusive on every edge.
///
/// Bounds are taken as given: `min_lon > max_lon` is not treated as an
/// antimeridian crossing and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleQuery {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl RectangleQuery {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Rectangle covering the whole coordinate range.
    pub fn world() -> Self {
        Self::new(-90.0, 90.0, -180.0, 180.0)
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}
