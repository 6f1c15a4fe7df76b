//! Demo directory: three buildings, a ten-node activity forest and four
//! organizations.

use super::MemoryStore;
use crate::error::Result;
use orgdir_types::Dataset;
use orgdir_types::entity::{Activity, ActivityId, Building, Organization, Phone};

const BUILDINGS: [(&str, f64, f64); 3] = [
    ("г. Москва, ул. Ленина 1, офис 3", 55.7558, 37.6173),
    ("г. Москва, ул. Блюхера 32/1", 55.7600, 37.6200),
    ("г. Санкт-Петербург, Невский пр. 10", 59.9343, 30.3351),
];

/// `(name, parent index)` in id order; parents always precede children.
const ACTIVITIES: [(&str, Option<usize>); 10] = [
    ("Еда", None),
    ("Автомобили", None),
    ("Одежда", None),
    ("Мясная продукция", Some(0)),
    ("Молочная продукция", Some(0)),
    ("Овощи и фрукты", Some(0)),
    ("Грузовые", Some(1)),
    ("Легковые", Some(1)),
    ("Запчасти", Some(7)),
    ("Аксессуары", Some(7)),
];

/// `(name, building index, activity indexes, phones)`
const ORGANIZATIONS: [(&str, usize, &[usize], &[&str]); 4] = [
    ("ООО \"Рога и Копыта\"", 0, &[3, 4], &["2-222-222", "3-333-333"]),
    ("АО \"Мясной двор\"", 1, &[3], &["8-923-666-13-13"]),
    ("ИП \"Молочные реки\"", 0, &[4], &["4-444-444"]),
    ("ООО \"Автозапчасти\"", 2, &[8], &["5-555-555"]),
];

/// The demo directory with ids assigned from 1 in declaration order.
pub fn demo_dataset() -> Dataset {
    let id = |index: usize| index as i64 + 1;

    let buildings = BUILDINGS
        .iter()
        .enumerate()
        .map(|(i, &(address, lat, lon))| Building::new(id(i), address, lat, lon))
        .collect();

    let mut activities: Vec<Activity> = Vec::with_capacity(ACTIVITIES.len());
    for (i, &(name, parent)) in ACTIVITIES.iter().enumerate() {
        let level = parent.map_or(1, |p| activities[p].level + 1);
        activities.push(Activity::new(id(i), name, level, parent.map(id)));
    }

    let mut next_phone = 0;
    let organizations = ORGANIZATIONS
        .iter()
        .enumerate()
        .map(|(i, &(name, building, tags, numbers))| {
            let mut org = Organization::new(id(i), name, id(building))
                .with_activities(tags.iter().map(|&t| id(t)));
            for number in numbers {
                next_phone += 1;
                org.phones.push(Phone {
                    id: next_phone,
                    organization_id: org.id,
                    phone_number: (*number).to_string(),
                });
            }
            org
        })
        .collect();

    Dataset {
        buildings,
        activities,
        organizations,
    }
}

/// Adds the demo directory to `store` through its regular mutations.
///
/// Ids are whatever the store assigns, so seeding a non-empty store works.
pub fn seed_demo(store: &MemoryStore) -> Result<()> {
    let mut building_ids = Vec::with_capacity(BUILDINGS.len());
    for &(address, lat, lon) in &BUILDINGS {
        building_ids.push(store.add_building(address, lat, lon)?.id);
    }

    let mut activity_ids: Vec<ActivityId> = Vec::with_capacity(ACTIVITIES.len());
    for &(name, parent) in &ACTIVITIES {
        let parent_id = parent.map(|p| activity_ids[p]);
        activity_ids.push(store.add_activity(name, parent_id)?.id);
    }

    for &(name, building, tags, numbers) in &ORGANIZATIONS {
        let org = store.add_organization(name, building_ids[building])?;
        for &tag in tags {
            store.link_activity(org.id, activity_ids[tag])?;
        }
        for number in numbers {
            store.add_phone(org.id, *number)?;
        }
    }

    log::info!(
        "Seeded demo directory: {} buildings, {} activities, {} organizations",
        BUILDINGS.len(),
        ACTIVITIES.len(),
        ORGANIZATIONS.len()
    );
    Ok(())
}
