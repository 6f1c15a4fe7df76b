//! In-memory directory store.

use super::{DirectoryStore, FilterHint, StoreStats};
use crate::compute::hierarchy::ActivityHierarchy;
use crate::compute::spatial::in_rectangle;
use crate::compute::validation::{validate_coordinates, validate_text};
use crate::error::{DirectoryError, Result};
use orgdir_types::Dataset;
use orgdir_types::entity::{
    Activity, ActivityId, Building, BuildingId, Organization, OrganizationId, OrganizationRecord,
    Phone,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Entities keyed by id. Ordered maps keep snapshots in id order.
#[derive(Debug, Default)]
struct Tables {
    buildings: BTreeMap<BuildingId, Building>,
    activities: BTreeMap<ActivityId, Activity>,
    organizations: BTreeMap<OrganizationId, Organization>,
    next_building_id: BuildingId,
    next_activity_id: ActivityId,
    next_organization_id: OrganizationId,
    next_phone_id: i64,
}

impl Tables {
    fn new() -> Self {
        Self {
            next_building_id: 1,
            next_activity_id: 1,
            next_organization_id: 1,
            next_phone_id: 1,
            ..Default::default()
        }
    }

    fn record(&self, organization: &Organization) -> Option<OrganizationRecord> {
        match self.buildings.get(&organization.building_id) {
            Some(building) => Some(OrganizationRecord::new(organization.clone(), building.clone())),
            None => {
                log::warn!(
                    "Organization {} references missing building {}",
                    organization.id,
                    organization.building_id
                );
                None
            }
        }
    }

    fn phone_count(&self) -> usize {
        self.organizations.values().map(|org| org.phones.len()).sum()
    }
}

/// Thread-safe in-memory store with the administrative mutations of the
/// directory.
///
/// Ids are assigned from 1 upwards per entity kind. Every successful
/// mutation bumps the generation.
///
/// # Example
///
/// ```rust
/// use orgdir::MemoryStore;
///
/// let store = MemoryStore::new();
/// let building = store.add_building("г. Москва, ул. Ленина 1, офис 3", 55.7558, 37.6173)?;
/// let food = store.add_activity("Еда", None)?;
/// let meat = store.add_activity("Мясная продукция", Some(food.id))?;
/// assert_eq!(meat.level, 2);
///
/// let org = store.add_organization("ООО \"Рога и Копыта\"", building.id)?;
/// store.link_activity(org.id, meat.id)?;
/// store.add_phone(org.id, "2-222-222")?;
/// # Ok::<(), orgdir::DirectoryError>(())
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    generation: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Builds a store from a dataset, rejecting anything the mutations would reject.
    ///
    /// Ids are taken from the dataset; new ids continue after the largest one.
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let mut tables = Tables::new();

        for building in dataset.buildings {
            validate_text("address", &building.address)?;
            validate_coordinates(building.latitude, building.longitude)?;
            if tables.buildings.contains_key(&building.id) {
                return Err(duplicate("building", building.id));
            }
            tables.next_building_id = tables.next_building_id.max(successor("building", building.id)?);
            tables.buildings.insert(building.id, building);
        }

        for activity in &dataset.activities {
            validate_text("activity name", &activity.name)?;
            if tables.activities.contains_key(&activity.id) {
                return Err(duplicate("activity", activity.id));
            }
            tables.next_activity_id = tables.next_activity_id.max(successor("activity", activity.id)?);
            tables.activities.insert(activity.id, activity.clone());
        }

        for activity in &dataset.activities {
            if let Some(parent) = activity.parent_id
                && !tables.activities.contains_key(&parent)
            {
                return Err(DirectoryError::InvalidFormat(format!(
                    "activity {} has unknown parent {}",
                    activity.id, parent
                )));
            }
        }

        if let Some(id) = ActivityHierarchy::new(&dataset.activities).find_cycle() {
            log::warn!("Rejecting dataset: activity {} is its own ancestor", id);
            return Err(DirectoryError::InvalidFormat(format!(
                "activity {} is its own ancestor",
                id
            )));
        }

        let mut phone_ids = std::collections::BTreeSet::new();
        for mut organization in dataset.organizations {
            validate_text("organization name", &organization.name)?;
            if tables.organizations.contains_key(&organization.id) {
                return Err(duplicate("organization", organization.id));
            }
            if !tables.buildings.contains_key(&organization.building_id) {
                return Err(DirectoryError::InvalidFormat(format!(
                    "organization {} references unknown building {}",
                    organization.id, organization.building_id
                )));
            }
            if let Some(missing) = organization
                .activity_ids
                .iter()
                .find(|&&id| !tables.activities.contains_key(&id))
            {
                return Err(DirectoryError::InvalidFormat(format!(
                    "organization {} references unknown activity {}",
                    organization.id, missing
                )));
            }
            for phone in &organization.phones {
                validate_text("phone number", &phone.phone_number)?;
                if phone.organization_id != organization.id {
                    return Err(DirectoryError::InvalidFormat(format!(
                        "phone {} belongs to organization {}, listed under {}",
                        phone.id, phone.organization_id, organization.id
                    )));
                }
                if !phone_ids.insert(phone.id) {
                    return Err(duplicate("phone", phone.id));
                }
                tables.next_phone_id = tables.next_phone_id.max(successor("phone", phone.id)?);
            }

            // Normalise duplicated tags.
            let tags = std::mem::take(&mut organization.activity_ids);
            let organization = organization.with_activities(tags);

            tables.next_organization_id = tables.next_organization_id.max(successor("organization", organization.id)?);
            tables.organizations.insert(organization.id, organization);
        }

        log::debug!(
            "Loaded dataset: {} buildings, {} activities, {} organizations",
            tables.buildings.len(),
            tables.activities.len(),
            tables.organizations.len()
        );

        Ok(Self {
            tables: RwLock::new(tables),
            generation: AtomicU64::new(0),
        })
    }

    /// Copies every entity into a dataset, in id order.
    pub fn to_dataset(&self) -> Dataset {
        let tables = self.tables.read();
        Dataset {
            buildings: tables.buildings.values().cloned().collect(),
            activities: tables.activities.values().cloned().collect(),
            organizations: tables.organizations.values().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        let tables = self.tables.read();
        tables.buildings.is_empty() && tables.activities.is_empty() && tables.organizations.is_empty()
    }

    pub fn add_building(
        &self,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Building> {
        let address = address.into();
        validate_text("address", &address)?;
        validate_coordinates(latitude, longitude)?;

        let mut tables = self.tables.write();
        let id = tables.next_building_id;
        let next = successor("building", id)?;
        let building = Building::new(id, address, latitude, longitude);
        tables.next_building_id = next;
        tables.buildings.insert(building.id, building.clone());
        self.bump();
        Ok(building)
    }

    /// Adds an activity one level below `parent_id`, or a root when `None`.
    pub fn add_activity(&self, name: impl Into<String>, parent_id: Option<ActivityId>) -> Result<Activity> {
        let name = name.into();
        validate_text("activity name", &name)?;

        let mut tables = self.tables.write();
        let level = match parent_id {
            Some(parent) => match tables.activities.get(&parent) {
                Some(parent) => parent.level.checked_add(1).ok_or_else(|| {
                    DirectoryError::InvalidInput(format!("activity {} is at the deepest level", parent.id))
                })?,
                None => return Err(DirectoryError::not_found("activity", parent)),
            },
            None => 1,
        };

        let id = tables.next_activity_id;
        let next = successor("activity", id)?;
        let activity = Activity::new(id, name, level, parent_id);
        tables.next_activity_id = next;
        tables.activities.insert(activity.id, activity.clone());
        self.bump();
        Ok(activity)
    }

    pub fn add_organization(&self, name: impl Into<String>, building_id: BuildingId) -> Result<Organization> {
        let name = name.into();
        validate_text("organization name", &name)?;

        let mut tables = self.tables.write();
        if !tables.buildings.contains_key(&building_id) {
            return Err(DirectoryError::not_found("building", building_id));
        }

        let id = tables.next_organization_id;
        let next = successor("organization", id)?;
        let organization = Organization::new(id, name, building_id);
        tables.next_organization_id = next;
        tables.organizations.insert(organization.id, organization.clone());
        self.bump();
        Ok(organization)
    }

    /// Tags an organization with an activity. Returns false if already tagged.
    pub fn link_activity(&self, organization_id: OrganizationId, activity_id: ActivityId) -> Result<bool> {
        let mut tables = self.tables.write();
        if !tables.activities.contains_key(&activity_id) {
            return Err(DirectoryError::not_found("activity", activity_id));
        }
        let organization = tables
            .organizations
            .get_mut(&organization_id)
            .ok_or_else(|| DirectoryError::not_found("organization", organization_id))?;

        let added = organization.tag(activity_id);
        if added {
            self.bump();
        }
        Ok(added)
    }

    pub fn add_phone(&self, organization_id: OrganizationId, phone_number: impl Into<String>) -> Result<Phone> {
        let phone_number = phone_number.into();
        validate_text("phone number", &phone_number)?;

        let mut tables = self.tables.write();
        let id = tables.next_phone_id;
        let next = successor("phone", id)?;
        let organization = tables
            .organizations
            .get_mut(&organization_id)
            .ok_or_else(|| DirectoryError::not_found("organization", organization_id))?;

        let phone = Phone {
            id,
            organization_id,
            phone_number,
        };
        organization.phones.push(phone.clone());
        tables.next_phone_id = next;
        self.bump();
        Ok(phone)
    }

    // Must run while the write lock is held.
    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryStore for MemoryStore {
    fn fetch_all_activities(&self) -> Result<Vec<Activity>> {
        Ok(self.tables.read().activities.values().cloned().collect())
    }

    fn fetch_buildings(&self) -> Result<Vec<Building>> {
        Ok(self.tables.read().buildings.values().cloned().collect())
    }

    fn fetch_organizations_snapshot(&self, hint: &FilterHint) -> Result<Vec<OrganizationRecord>> {
        let tables = self.tables.read();

        let records = match *hint {
            FilterHint::All => tables
                .organizations
                .values()
                .filter_map(|org| tables.record(org))
                .collect(),
            FilterHint::Organization(id) => tables
                .organizations
                .get(&id)
                .and_then(|org| tables.record(org))
                .into_iter()
                .collect(),
            FilterHint::Building(building_id) => tables
                .organizations
                .values()
                .filter(|org| org.building_id == building_id)
                .filter_map(|org| tables.record(org))
                .collect(),
            FilterHint::Region(rect) => tables
                .organizations
                .values()
                .filter_map(|org| tables.record(org))
                .filter(|record| {
                    in_rectangle(
                        rect.min_lat,
                        rect.max_lat,
                        rect.min_lon,
                        rect.max_lon,
                        record.building.latitude,
                        record.building.longitude,
                    )
                })
                .collect(),
        };

        Ok(records)
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn stats(&self) -> Result<StoreStats> {
        let tables = self.tables.read();
        Ok(StoreStats {
            buildings: tables.buildings.len(),
            activities: tables.activities.len(),
            organizations: tables.organizations.len(),
            phones: tables.phone_count(),
            generation: self.generation(),
        })
    }
}

/// The id allocated after `id`.
fn successor(kind: &str, id: i64) -> Result<i64> {
    id.checked_add(1)
        .ok_or_else(|| DirectoryError::InvalidFormat(format!("{} id {} out of range", kind, id)))
}

fn duplicate(kind: &str, id: i64) -> DirectoryError {
    DirectoryError::Conflict(format!("duplicate {} id {}", kind, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed::demo_dataset;
    use orgdir_types::query::RectangleQuery;

    #[test]
    fn test_ids_start_at_one() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let b = store.add_building("г. Москва, ул. Ленина 1, офис 3", 55.7558, 37.6173).unwrap();
        let a = store.add_activity("Еда", None).unwrap();
        let o = store.add_organization("ООО \"Рога и Копыта\"", b.id).unwrap();
        let p = store.add_phone(o.id, "2-222-222").unwrap();

        assert_eq!((b.id, a.id, o.id, p.id), (1, 1, 1, 1));
        assert_eq!(a.level, 1);
        assert!(a.parent_id.is_none());
    }

    #[test]
    fn test_activity_level_follows_parent() {
        let store = MemoryStore::new();
        let cars = store.add_activity("Автомобили", None).unwrap();
        let passenger = store.add_activity("Легковые", Some(cars.id)).unwrap();
        let parts = store.add_activity("Запчасти", Some(passenger.id)).unwrap();
        assert_eq!(parts.level, 3);
        assert_eq!(parts.parent_id, Some(passenger.id));

        let err = store.add_activity("Сироты", Some(99)).unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { kind: "activity", id: 99 }));
    }

    #[test]
    fn test_dataset_ids_at_the_top_of_the_range() {
        let dataset = Dataset {
            buildings: vec![Building::new(i64::MAX, "addr", 0.0, 0.0)],
            ..Dataset::new()
        };
        let err = MemoryStore::from_dataset(dataset).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidFormat(ref msg) if msg.contains("out of range")));

        let dataset = Dataset {
            activities: vec![Activity::root(i64::MAX, "Еда")],
            ..Dataset::new()
        };
        assert!(matches!(
            MemoryStore::from_dataset(dataset),
            Err(DirectoryError::InvalidFormat(_))
        ));

        // The last id is reachable from a dataset but never allocated.
        let dataset = Dataset {
            buildings: vec![Building::new(i64::MAX - 1, "addr", 0.0, 0.0)],
            ..Dataset::new()
        };
        let store = MemoryStore::from_dataset(dataset).unwrap();
        assert!(store.add_building("next", 0.0, 0.0).is_err());
        assert_eq!(store.stats().unwrap().buildings, 1);
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_activity_level_at_the_top_of_the_range() {
        let dataset = Dataset {
            activities: vec![Activity::new(1, "Глубоко", i32::MAX, None)],
            ..Dataset::new()
        };
        let store = MemoryStore::from_dataset(dataset).unwrap();
        let err = store.add_activity("Глубже", Some(1)).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidInput(_)));
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_mutations_validate_input() {
        let store = MemoryStore::new();
        assert!(store.add_building("", 0.0, 0.0).is_err());
        assert!(store.add_building("Полюс", 91.0, 0.0).is_err());
        assert!(store.add_building("Нигде", f64::NAN, 0.0).is_err());

        let err = store.add_organization("ООО \"Призрак\"", 7).unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { kind: "building", id: 7 }));

        assert!(store.link_activity(1, 1).is_err());
        assert!(store.add_phone(1, "1-111-111").is_err());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_link_activity_is_idempotent() {
        let store = MemoryStore::from_dataset(demo_dataset()).unwrap();
        let before = store.generation();

        assert!(!store.link_activity(1, 4).unwrap());
        assert_eq!(store.generation(), before);

        assert!(store.link_activity(1, 6).unwrap());
        assert_eq!(store.generation(), before + 1);
    }

    #[test]
    fn test_snapshot_hints() {
        let store = MemoryStore::from_dataset(demo_dataset()).unwrap();

        let all = store.fetch_organizations_snapshot(&FilterHint::All).unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let in_first = store.fetch_organizations_snapshot(&FilterHint::Building(1)).unwrap();
        assert_eq!(in_first.len(), 2);

        let one = store.fetch_organizations_snapshot(&FilterHint::Organization(4)).unwrap();
        assert_eq!(one[0].building.address, "г. Санкт-Петербург, Невский пр. 10");
        assert!(store.fetch_organizations_snapshot(&FilterHint::Organization(9)).unwrap().is_empty());

        let spb = RectangleQuery::new(59.0, 60.0, 30.0, 31.0);
        let region = store.fetch_organizations_snapshot(&FilterHint::Region(spb)).unwrap();
        assert_eq!(region.len(), 1);
    }

    #[test]
    fn test_stats() {
        let store = MemoryStore::from_dataset(demo_dataset()).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.buildings, 3);
        assert_eq!(stats.activities, 10);
        assert_eq!(stats.organizations, 4);
        assert_eq!(stats.phones, 5);
    }

    #[test]
    fn test_dataset_roundtrip_keeps_ids() {
        let store = MemoryStore::from_dataset(demo_dataset()).unwrap();
        let copy = MemoryStore::from_dataset(store.to_dataset()).unwrap();
        assert_eq!(store.to_dataset(), copy.to_dataset());

        let next = copy.add_building("г. Казань, ул. Баумана 5", 55.7887, 49.1221).unwrap();
        assert_eq!(next.id, 4);
        let phone = copy.add_phone(2, "8-800-000-00-00").unwrap();
        assert_eq!(phone.id, 6);
    }

    #[test]
    fn test_rejects_cyclic_taxonomy() {
        let mut dataset = demo_dataset();
        // Make "Еда" a child of "Мясная продукция", its own child.
        dataset.activities[0].parent_id = Some(4);

        let err = MemoryStore::from_dataset(dataset).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidFormat(_)));
        assert!(err.to_string().contains("own ancestor"));
    }

    #[test]
    fn test_rejects_dangling_references() {
        let mut dataset = demo_dataset();
        dataset.organizations[0].building_id = 42;
        assert!(MemoryStore::from_dataset(dataset).is_err());

        let mut dataset = demo_dataset();
        dataset.organizations[0].activity_ids.push(77);
        assert!(MemoryStore::from_dataset(dataset).is_err());

        let mut dataset = demo_dataset();
        dataset.activities[3].parent_id = Some(55);
        assert!(MemoryStore::from_dataset(dataset).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut dataset = demo_dataset();
        let copy = dataset.buildings[0].clone();
        dataset.buildings.push(copy);

        let err = MemoryStore::from_dataset(dataset).unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(_)));
    }
}
