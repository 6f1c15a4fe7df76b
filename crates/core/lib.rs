//! Query engine for an organization directory.
//!
//! ## Features
//! - **Activity hierarchy**: descendant resolution and nested forest views over
//!   a parent-linked taxonomy, safe on malformed (cyclic) input
//! - **Geo filters**: haversine distance, inclusive radius and rectangle
//!   membership, with an optional R*-tree index that answers exactly as the scan
//! - **Directory intents**: organizations by building, by activity (single or
//!   subtree), by region, by id and by name, plus the activity forest
//! - **Storage**: an in-memory store with JSON dataset files and a demo seed
//!
//! Intents never fail for business reasons: an unknown id yields an empty
//! result or `None`.
//!
//! ```rust
//! use orgdir::prelude::*;
//!
//! let directory = DirectoryBuilder::new().demo_data(true).build()?;
//!
//! // Tagged with "Мясная продукция" or "Молочная продукция", both under "Еда".
//! assert!(directory.organizations_by_activity(1)?.is_empty());
//! assert_eq!(directory.organizations_by_activity_tree(1)?.len(), 3);
//!
//! let moscow = RadiusQuery::new(55.7558, 37.6173, 5.0);
//! assert_eq!(directory.organizations_in_radius(&moscow)?.len(), 3);
//! # Ok::<(), orgdir::DirectoryError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod directory;
pub mod error;
pub mod storage;

pub use builder::DirectoryBuilder;
pub use directory::{Catalog, Directory};
pub use error::{DirectoryError, Result};

pub use config::{
    Activity, ActivityId, Building, BuildingId, Config, Dataset, GeoPoint, Organization,
    OrganizationId, OrganizationRecord, Phone, PhoneId, RadiusQuery, RectangleQuery, StoreStats,
    TreeNode,
};

pub use compute::hierarchy::{
    ActivityHierarchy, HierarchyIndex, MAX_TREE_DEPTH, build_tree, descendant_ids,
};
pub use compute::spatial::{SpatialIndex, distance_km, in_radius, in_rectangle};
pub use compute::validation;

pub use storage::{DatasetFile, DirectoryStore, FilterHint, MemoryStore};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Directory, DirectoryBuilder, DirectoryError, Result};

    pub use crate::{Config, RadiusQuery, RectangleQuery};

    pub use crate::{Activity, Building, Organization, OrganizationRecord, TreeNode};

    pub use crate::{DirectoryStore, FilterHint, MemoryStore};

    pub use crate::{build_tree, descendant_ids, distance_km, in_radius, in_rectangle};
}
