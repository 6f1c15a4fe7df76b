pub mod algorithms;
pub use algorithms::{EARTH_RADIUS_KM, distance_between, distance_km};

pub mod region;
pub use region::{RegionQuery, in_radius, in_rectangle};

pub mod rtree;
pub use rtree::SpatialIndex;
