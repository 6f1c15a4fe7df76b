use orgdir::prelude::*;
use orgdir::{ActivityHierarchy, Catalog, OrganizationId};
use std::collections::BTreeSet;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn demo() -> Directory<MemoryStore> {
    init_logging();
    DirectoryBuilder::new().demo_data(true).build().unwrap()
}

fn ids(records: &[OrganizationRecord]) -> Vec<OrganizationId> {
    records.iter().map(OrganizationRecord::id).collect()
}

#[test]
fn test_subtree_finds_what_single_activity_misses() {
    let directory = demo();

    // Organization 1 is tagged with 4 and 5, both children of 1.
    let single = directory.organizations_by_activity(1).unwrap();
    let subtree = directory.organizations_by_activity_tree(1).unwrap();

    assert!(!ids(&single).contains(&1));
    assert!(ids(&subtree).contains(&1));
    assert_eq!(ids(&subtree), vec![1, 2, 3]);
}

#[test]
fn test_subtree_through_two_levels() {
    let directory = demo();
    // "Автозапчасти" is tagged with "Запчасти", a grandchild of "Автомобили".
    assert_eq!(ids(&directory.organizations_by_activity_tree(2).unwrap()), vec![4]);
    assert_eq!(ids(&directory.organizations_by_activity_tree(8).unwrap()), vec![4]);
    assert!(directory.organizations_by_activity_tree(7).unwrap().is_empty());
}

#[test]
fn test_descendants_of_cars() {
    let directory = demo();
    let catalog = directory.catalog().unwrap();
    let found = descendant_ids(catalog.activities(), 2);
    assert_eq!(found, BTreeSet::from([2, 7, 8, 9, 10]));
    assert!(descendant_ids(catalog.activities(), 999).is_empty());
}

#[test]
fn test_name_search() {
    let directory = demo();
    let found = directory.search_by_name("молочн").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "ИП \"Молочные реки\"");

    assert!(directory.search_by_name("банк").unwrap().is_empty());
}

#[test]
fn test_region_intents() {
    let directory = demo();

    let near_lenina = RadiusQuery::new(55.7558, 37.6173, 0.1);
    assert_eq!(ids(&directory.organizations_in_radius(&near_lenina).unwrap()), vec![1, 3]);

    let russia = RectangleQuery::new(41.0, 82.0, 19.0, 180.0);
    assert_eq!(
        ids(&directory.organizations_in_rectangle(&russia).unwrap()),
        vec![1, 2, 3, 4]
    );

    let pacific = RectangleQuery::new(-10.0, 10.0, -170.0, -150.0);
    assert!(directory.organizations_in_rectangle(&pacific).unwrap().is_empty());
}

#[test]
fn test_organization_by_id() {
    let directory = demo();
    let record = directory.organization(1).unwrap().unwrap();
    assert_eq!(record.building.address, "г. Москва, ул. Ленина 1, офис 3");

    let phones: Vec<_> = record
        .organization
        .phones
        .iter()
        .map(|p| p.phone_number.as_str())
        .collect();
    assert_eq!(phones, vec!["2-222-222", "3-333-333"]);

    assert!(directory.organization(404).unwrap().is_none());
}

#[test]
fn test_activity_forest() {
    let directory = demo();
    let forest = directory.activity_tree().unwrap();

    let roots: Vec<_> = forest.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(roots, vec!["Еда", "Автомобили", "Одежда"]);

    let food: Vec<_> = forest[0].children.iter().map(|n| n.id).collect();
    assert_eq!(food, vec![4, 5, 6]);

    let passenger = forest[1].find(8).unwrap();
    let parts: Vec<_> = passenger.children.iter().map(|n| n.id).collect();
    assert_eq!(parts, vec![9, 10]);
    assert!(forest[2].children.is_empty());
}

#[test]
fn test_forest_roots_are_parentless_nodes() {
    let directory = demo();
    let catalog = directory.catalog().unwrap();

    let forest = build_tree(catalog.activities(), None);
    let roots: BTreeSet<_> = forest.iter().map(|n| n.id).collect();
    let parentless: BTreeSet<_> = catalog
        .activities()
        .iter()
        .filter(|a| a.parent_id.is_none())
        .map(|a| a.id)
        .collect();
    assert_eq!(roots, parentless);

    fn check(node: &TreeNode, activities: &[Activity]) {
        let expected: Vec<_> = activities
            .iter()
            .filter(|a| a.parent_id == Some(node.id))
            .map(|a| a.id)
            .collect();
        let actual: Vec<_> = node.children.iter().map(|c| c.id).collect();
        assert_eq!(actual, expected, "children of {}", node.id);
        node.children.iter().for_each(|c| check(c, activities));
    }
    forest.iter().for_each(|root| check(root, catalog.activities()));
}

#[test]
fn test_cyclic_snapshot_terminates() {
    init_logging();
    let nodes = vec![
        Activity::new(1, "A", 1, Some(2)),
        Activity::new(2, "B", 2, Some(1)),
    ];

    let found = descendant_ids(&nodes, 1);
    assert!(found.is_subset(&BTreeSet::from([1, 2])));
    assert!(found.contains(&1));

    // Neither node is parentless, so the forest is empty.
    assert!(build_tree(&nodes, None).is_empty());
    assert_eq!(ActivityHierarchy::new(&nodes).find_cycle(), Some(1));
}

#[test]
fn test_catalog_over_unvalidated_snapshot() {
    init_logging();
    // A catalog does not require the store's guarantees.
    let activities = vec![
        Activity::new(1, "A", 1, Some(2)),
        Activity::new(2, "B", 2, Some(1)),
        Activity::root(3, "C"),
    ];
    let building = Building::new(1, "somewhere", 0.0, 0.0);
    let org = Organization::new(1, "X", 1).with_activities([2]);
    let catalog = Catalog::new(
        activities,
        vec![building.clone()],
        vec![OrganizationRecord::new(org, building)],
        &Config::default(),
    );

    assert_eq!(catalog.organizations_by_activity_tree(1).len(), 1);
    assert!(catalog.organizations_by_activity_tree(3).is_empty());
    assert_eq!(catalog.activity_tree().len(), 1);
}

#[test]
fn test_store_changes_are_visible() {
    let directory = demo();
    let store = directory.store();

    let kazan = store.add_building("г. Казань, ул. Баумана 5", 55.7887, 49.1221).unwrap();
    let dairy = store.add_activity("Сыры", Some(5)).unwrap();
    assert_eq!(dairy.level, 3);

    let org = store.add_organization("ООО \"Сырная лавка\"", kazan.id).unwrap();
    store.link_activity(org.id, dairy.id).unwrap();

    assert_eq!(ids(&directory.organizations_by_activity_tree(1).unwrap()), vec![1, 2, 3, 5]);
    assert_eq!(ids(&directory.organizations_by_activity(5).unwrap()), vec![1, 3]);
    assert_eq!(ids(&directory.organizations_in_building(kazan.id).unwrap()), vec![5]);
}
