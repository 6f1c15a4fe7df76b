//! Immutable snapshot of a directory with the indexes the intents need.

use super::query;
use crate::compute::hierarchy::{ActivityHierarchy, HierarchyIndex};
use crate::compute::spatial::SpatialIndex;
use crate::config::Config;
use crate::error::Result;
use crate::storage::{DirectoryStore, FilterHint};
use orgdir_types::entity::{
    Activity, ActivityId, Building, BuildingId, OrganizationId, OrganizationRecord,
};
use orgdir_types::query::{RadiusQuery, RectangleQuery};
use orgdir_types::tree::TreeNode;
use rustc_hash::FxHashMap;

/// One consistent view of activities, buildings and organizations.
///
/// Every intent returns records in snapshot order. The optional spatial
/// index only prunes candidates, so region intents answer exactly as the
/// full scan does.
pub struct Catalog {
    activities: Vec<Activity>,
    taxonomy: HierarchyIndex,
    buildings: Vec<Building>,
    records: Vec<OrganizationRecord>,
    by_id: FxHashMap<OrganizationId, usize>,
    spatial: Option<SpatialIndex>,
    generation: u64,
}

impl Catalog {
    pub fn new(
        activities: Vec<Activity>,
        buildings: Vec<Building>,
        records: Vec<OrganizationRecord>,
        config: &Config,
    ) -> Self {
        let mut by_id = FxHashMap::default();
        by_id.reserve(records.len());
        for (position, record) in records.iter().enumerate() {
            by_id.entry(record.id()).or_insert(position);
        }

        let taxonomy = HierarchyIndex::new(&activities);
        let spatial = config
            .spatial_index
            .then(|| SpatialIndex::new(records.iter().map(OrganizationRecord::location)));

        Self {
            activities,
            taxonomy,
            buildings,
            records,
            by_id,
            spatial,
            generation: 0,
        }
    }

    /// Reads a full snapshot from `store`.
    ///
    /// The generation is sampled before reading, so a concurrent change
    /// makes the catalog look stale rather than current.
    pub fn load<S: DirectoryStore + ?Sized>(store: &S, config: &Config) -> Result<Self> {
        let generation = store.generation();
        let activities = store.fetch_all_activities()?;
        let buildings = store.fetch_buildings()?;
        let records = store.fetch_organizations_snapshot(&FilterHint::All)?;

        log::debug!(
            "Loaded catalog generation {}: {} activities, {} buildings, {} organizations",
            generation,
            activities.len(),
            buildings.len(),
            records.len()
        );

        let mut catalog = Self::new(activities, buildings, records, config);
        catalog.generation = generation;
        Ok(catalog)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn records(&self) -> &[OrganizationRecord] {
        &self.records
    }

    pub fn has_spatial_index(&self) -> bool {
        self.spatial.is_some()
    }

    pub fn hierarchy(&self) -> ActivityHierarchy<'_> {
        ActivityHierarchy::with_index(&self.activities, &self.taxonomy)
    }

    pub fn organizations_in_building(&self, building_id: BuildingId) -> Vec<&OrganizationRecord> {
        query::by_building(&self.records, building_id)
    }

    pub fn organizations_by_activity(&self, activity_id: ActivityId) -> Vec<&OrganizationRecord> {
        query::by_activity(&self.records, &self.hierarchy(), activity_id)
    }

    pub fn organizations_by_activity_tree(&self, activity_id: ActivityId) -> Vec<&OrganizationRecord> {
        query::by_activity_tree(&self.records, &self.hierarchy(), activity_id)
    }

    pub fn organizations_in_radius(&self, radius: &RadiusQuery) -> Vec<&OrganizationRecord> {
        match &self.spatial {
            Some(index) => self.at_positions(index.query_radius(radius)),
            None => query::in_radius(&self.records, radius),
        }
    }

    pub fn organizations_in_rectangle(&self, rect: &RectangleQuery) -> Vec<&OrganizationRecord> {
        match &self.spatial {
            Some(index) => self.at_positions(index.query_rectangle(rect)),
            None => query::in_rectangle(&self.records, rect),
        }
    }

    pub fn organization(&self, id: OrganizationId) -> Option<&OrganizationRecord> {
        self.by_id.get(&id).map(|&position| &self.records[position])
    }

    pub fn search_by_name(&self, needle: &str) -> Vec<&OrganizationRecord> {
        query::by_name(&self.records, needle)
    }

    pub fn activity_tree(&self) -> Vec<TreeNode> {
        query::activity_tree(&self.hierarchy())
    }

    /// An activity together with its nested descendants.
    pub fn activity_view(&self, id: ActivityId) -> Option<TreeNode> {
        self.hierarchy().subtree(id)
    }

    fn at_positions(&self, positions: Vec<usize>) -> Vec<&OrganizationRecord> {
        positions
            .into_iter()
            .map(|position| &self.records[position])
            .collect()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("generation", &self.generation)
            .field("activities", &self.activities.len())
            .field("buildings", &self.buildings.len())
            .field("organizations", &self.records.len())
            .field("spatial_index", &self.spatial.is_some())
            .finish()
    }
}
