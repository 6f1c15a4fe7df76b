//! # orgdir-types
//!
//! Entity and query types shared by the organization directory crates.
//!
//! - **Entities**: `Building`, `Activity`, `Organization`, `Phone`
//! - **Snapshot rows**: `OrganizationRecord` (an organization with its resolved building)
//! - **Views**: `TreeNode` for the nested activity taxonomy
//! - **Queries**: `RadiusQuery`, `RectangleQuery`
//! - **Documents**: `Dataset`, the serializable form of a whole directory
//!
//! All types are serializable with Serde. Coordinates are wrapped around the
//! `geo` crate's point primitive.
//!
//! ## Examples
//!
//! ```rust
//! use orgdir_types::geo::GeoPoint;
//! use orgdir_types::query::RectangleQuery;
//!
//! let moscow = GeoPoint::new(55.7558, 37.6173);
//! let region = RectangleQuery::new(55.0, 56.0, 37.0, 38.0);
//! assert!(region.min_lat <= moscow.lat() && moscow.lat() <= region.max_lat);
//! ```

pub mod dataset;
pub mod entity;
pub mod geo;
pub mod query;
pub mod stats;
pub mod tree;

pub use dataset::Dataset;
pub use entity::{
    Activity, ActivityId, Building, BuildingId, Organization, OrganizationId, OrganizationRecord,
    Phone, PhoneId,
};
pub use geo::GeoPoint;
pub use query::{RadiusQuery, RectangleQuery};
pub use stats::StoreStats;
pub use tree::TreeNode;
