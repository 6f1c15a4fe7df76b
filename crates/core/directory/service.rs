//! Directory service over a store.

use super::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::storage::DirectoryStore;
use orgdir_types::entity::{ActivityId, Building, BuildingId, OrganizationId, OrganizationRecord};
use orgdir_types::query::{RadiusQuery, RectangleQuery};
use orgdir_types::stats::StoreStats;
use orgdir_types::tree::TreeNode;
use parking_lot::RwLock;
use std::sync::Arc;

/// Answers the directory intents from a catalog cached per store generation.
///
/// The catalog is rebuilt on the first query after the store changes. Readers
/// holding an older `Arc<Catalog>` keep a consistent view.
///
/// # Example
///
/// ```rust
/// use orgdir::{Config, Directory, MemoryStore};
/// use orgdir::storage::seed::demo_dataset;
///
/// let store = MemoryStore::from_dataset(demo_dataset())?;
/// let directory = Directory::new(store, Config::default());
///
/// let dairy = directory.search_by_name("молочн")?;
/// assert_eq!(dairy.len(), 1);
/// # Ok::<(), orgdir::DirectoryError>(())
/// ```
pub struct Directory<S: DirectoryStore> {
    store: S,
    config: Config,
    cached: RwLock<Option<Arc<Catalog>>>,
}

impl<S: DirectoryStore> Directory<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            config,
            cached: RwLock::new(None),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current catalog, rebuilt if the store has changed since the last call.
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        let generation = self.store.generation();

        if let Some(catalog) = self.cached.read().as_ref()
            && catalog.generation() == generation
        {
            return Ok(Arc::clone(catalog));
        }

        let mut cached = self.cached.write();
        // Another writer may have rebuilt while we waited.
        if let Some(catalog) = cached.as_ref()
            && catalog.generation() == self.store.generation()
        {
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(Catalog::load(&self.store, &self.config)?);
        log::debug!("Rebuilt directory catalog at generation {}", catalog.generation());
        *cached = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    pub fn stats(&self) -> Result<StoreStats> {
        self.store.stats()
    }

    pub fn organizations_in_building(&self, building_id: BuildingId) -> Result<Vec<OrganizationRecord>> {
        let catalog = self.catalog()?;
        Ok(owned(catalog.organizations_in_building(building_id)))
    }

    pub fn organizations_by_activity(&self, activity_id: ActivityId) -> Result<Vec<OrganizationRecord>> {
        let catalog = self.catalog()?;
        Ok(owned(catalog.organizations_by_activity(activity_id)))
    }

    pub fn organizations_by_activity_tree(&self, activity_id: ActivityId) -> Result<Vec<OrganizationRecord>> {
        let catalog = self.catalog()?;
        Ok(owned(catalog.organizations_by_activity_tree(activity_id)))
    }

    pub fn organizations_in_radius(&self, query: &RadiusQuery) -> Result<Vec<OrganizationRecord>> {
        let catalog = self.catalog()?;
        Ok(owned(catalog.organizations_in_radius(query)))
    }

    pub fn organizations_in_rectangle(&self, query: &RectangleQuery) -> Result<Vec<OrganizationRecord>> {
        let catalog = self.catalog()?;
        Ok(owned(catalog.organizations_in_rectangle(query)))
    }

    pub fn organization(&self, id: OrganizationId) -> Result<Option<OrganizationRecord>> {
        let catalog = self.catalog()?;
        Ok(catalog.organization(id).cloned())
    }

    pub fn search_by_name(&self, needle: &str) -> Result<Vec<OrganizationRecord>> {
        let catalog = self.catalog()?;
        Ok(owned(catalog.search_by_name(needle)))
    }

    pub fn activity_tree(&self) -> Result<Vec<TreeNode>> {
        Ok(self.catalog()?.activity_tree())
    }

    pub fn activity_view(&self, id: ActivityId) -> Result<Option<TreeNode>> {
        Ok(self.catalog()?.activity_view(id))
    }

    pub fn buildings(&self) -> Result<Vec<Building>> {
        Ok(self.catalog()?.buildings().to_vec())
    }
}

fn owned(records: Vec<&OrganizationRecord>) -> Vec<OrganizationRecord> {
    records.into_iter().cloned().collect()
}

impl<S: DirectoryStore + std::fmt::Debug> std::fmt::Debug for Directory<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("cached", &self.cached.read().as_ref().map(|c| c.generation()))
            .finish()
    }
}
