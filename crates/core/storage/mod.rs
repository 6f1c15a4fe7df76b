//! Storage abstraction for directory entities.
//!
//! A store hands out snapshots; the directory never mutates through this
//! trait. Administrative writes live on the concrete store.

use crate::error::Result;
use orgdir_types::entity::{Activity, Building, BuildingId, OrganizationId, OrganizationRecord};
use orgdir_types::query::RectangleQuery;
use std::sync::Arc;

mod memory;
pub mod persistence;
pub mod seed;

pub use memory::MemoryStore;
pub use orgdir_types::stats::StoreStats;
pub use persistence::DatasetFile;

/// Source of directory snapshots.
///
/// Implementations must return each organization together with its resolved
/// building, in a stable order, and bump [`generation`](Self::generation)
/// whenever any entity changes.
pub trait DirectoryStore: Send + Sync {
    /// Every activity of the taxonomy
    fn fetch_all_activities(&self) -> Result<Vec<Activity>>;

    fn fetch_buildings(&self) -> Result<Vec<Building>>;

    /// Organizations with their buildings, pre-filtered by `hint`
    fn fetch_organizations_snapshot(&self, hint: &FilterHint) -> Result<Vec<OrganizationRecord>>;

    /// Monotonic change counter
    fn generation(&self) -> u64;

    fn stats(&self) -> Result<StoreStats>;
}

/// Pre-filter a store may apply to an organizations snapshot.
///
/// Hints are plain equality or range conditions a relational store could
/// push down. Callers still apply their exact predicate afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FilterHint {
    #[default]
    All,
    Building(BuildingId),
    Organization(OrganizationId),
    /// Buildings inside the rectangle, edges inclusive
    Region(RectangleQuery),
}

impl<S: DirectoryStore + ?Sized> DirectoryStore for Arc<S> {
    fn fetch_all_activities(&self) -> Result<Vec<Activity>> {
        (**self).fetch_all_activities()
    }

    fn fetch_buildings(&self) -> Result<Vec<Building>> {
        (**self).fetch_buildings()
    }

    fn fetch_organizations_snapshot(&self, hint: &FilterHint) -> Result<Vec<OrganizationRecord>> {
        (**self).fetch_organizations_snapshot(hint)
    }

    fn generation(&self) -> u64 {
        (**self).generation()
    }

    fn stats(&self) -> Result<StoreStats> {
        (**self).stats()
    }
}
