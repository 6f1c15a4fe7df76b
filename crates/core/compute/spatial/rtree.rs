//! R*-tree index over building locations.
//!
//! Answers radius and rectangle queries with envelope pruning followed by the
//! exact predicate, so results are identical to a full scan. Results are
//! positions into the indexed slice, in ascending order.
//!
//! # Example
//!
//! ```rust
//! use orgdir::compute::spatial::SpatialIndex;
//! use orgdir_types::{GeoPoint, RadiusQuery};
//!
//! let index = SpatialIndex::new([
//!     GeoPoint::new(55.7558, 37.6173),
//!     GeoPoint::new(59.9343, 30.3351),
//! ]);
//! assert_eq!(index.query_radius(&RadiusQuery::new(55.75, 37.61, 10.0)), vec![0]);
//! ```

use super::algorithms::EARTH_RADIUS_KM;
use super::region::RegionQuery;
use orgdir_types::geo::GeoPoint;
use orgdir_types::query::{RadiusQuery, RectangleQuery};
use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

/// Slack added to envelope half-widths, in degrees, to absorb rounding.
const ENVELOPE_MARGIN_DEG: f64 = 1e-6;

/// `[lon, lat]` with the position of the location in the indexed slice.
type IndexedLocation = GeomWithData<[f64; 2], usize>;

pub struct SpatialIndex {
    tree: RTree<IndexedLocation>,
    locations: Vec<GeoPoint>,
    /// Positions with non-finite or out-of-range coordinates, always checked by scan
    unindexed: Vec<usize>,
}

impl SpatialIndex {
    pub fn new<I: IntoIterator<Item = GeoPoint>>(locations: I) -> Self {
        let locations: Vec<GeoPoint> = locations.into_iter().collect();
        let mut entries = Vec::with_capacity(locations.len());
        let mut unindexed = Vec::new();

        for (position, location) in locations.iter().enumerate() {
            if location.is_in_range() {
                entries.push(IndexedLocation::new([location.lon(), location.lat()], position));
            } else {
                unindexed.push(position);
            }
        }

        if !unindexed.is_empty() {
            log::debug!(
                "{} locations outside the coordinate range are kept out of the R*-tree",
                unindexed.len()
            );
        }

        Self {
            tree: RTree::bulk_load(entries),
            locations,
            unindexed,
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Positions of the locations inside the rectangle (edges inclusive).
    pub fn query_rectangle(&self, rect: &RectangleQuery) -> Vec<usize> {
        // Inverted or NaN bounds match nothing; AABB would silently reorder them.
        let ordered = rect.min_lat <= rect.max_lat && rect.min_lon <= rect.max_lon;
        if !ordered {
            return self.scan_unindexed(rect);
        }

        let envelope = AABB::from_corners([rect.min_lon, rect.min_lat], [rect.max_lon, rect.max_lat]);
        self.collect(rect, &envelope)
    }

    /// Positions of the locations within the radius (boundary inclusive).
    pub fn query_radius(&self, query: &RadiusQuery) -> Vec<usize> {
        // Distances are never negative, and NaN never compares true.
        if query.radius_km.is_nan() || query.radius_km < 0.0 {
            return Vec::new();
        }

        match radius_envelope(query) {
            Some(envelope) => self.collect(query, &envelope),
            None => self.scan_all(query),
        }
    }

    fn collect<Q: RegionQuery>(&self, query: &Q, envelope: &AABB<[f64; 2]>) -> Vec<usize> {
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope(envelope)
            .map(|entry| entry.data)
            .filter(|&position| query.contains(&self.locations[position]))
            .collect();
        hits.extend(self.scan_unindexed(query));
        hits.sort_unstable();
        hits
    }

    fn scan_unindexed<Q: RegionQuery>(&self, query: &Q) -> Vec<usize> {
        self.unindexed
            .iter()
            .copied()
            .filter(|&position| query.contains(&self.locations[position]))
            .collect()
    }

    fn scan_all<Q: RegionQuery>(&self, query: &Q) -> Vec<usize> {
        self.locations
            .iter()
            .enumerate()
            .filter(|(_, location)| query.contains(location))
            .map(|(position, _)| position)
            .collect()
    }
}

/// Bounding envelope of a spherical cap, or `None` when the cap is too large
/// (or the center too unusual) for a single envelope and a scan is needed.
///
/// Longitude half-width is `asin(sin(d) / cos(lat))` for angular radius `d`;
/// caps reaching a pole or crossing the antimeridian use the full longitude range.
fn radius_envelope(query: &RadiusQuery) -> Option<AABB<[f64; 2]>> {
    let center = query.center();
    if !center.is_in_range() {
        return None;
    }

    let angular = query.radius_km / EARTH_RADIUS_KM;
    if !angular.is_finite() || angular >= std::f64::consts::FRAC_PI_2 {
        return None;
    }

    let lat_delta = angular.to_degrees() + ENVELOPE_MARGIN_DEG;
    let min_lat = center.lat() - lat_delta;
    let max_lat = center.lat() + lat_delta;

    if min_lat <= -90.0 || max_lat >= 90.0 {
        return Some(AABB::from_corners(
            [-180.0, min_lat.max(-90.0)],
            [180.0, max_lat.min(90.0)],
        ));
    }

    let ratio = angular.sin() / center.lat().to_radians().cos();
    if !ratio.is_finite() || ratio >= 1.0 {
        return Some(AABB::from_corners([-180.0, min_lat], [180.0, max_lat]));
    }

    let lon_delta = ratio.asin().to_degrees() + ENVELOPE_MARGIN_DEG;
    let min_lon = center.lon() - lon_delta;
    let max_lon = center.lon() + lon_delta;

    if min_lon < -180.0 || max_lon > 180.0 {
        return Some(AABB::from_corners([-180.0, min_lat], [180.0, max_lat]));
    }

    Some(AABB::from_corners([min_lon, min_lat], [max_lon, max_lat]))
}
