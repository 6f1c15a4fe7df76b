//! The directory intents as pure functions over a snapshot.
//!
//! Every function preserves the snapshot order of `records`. Unknown ids
//! produce empty results, never errors.

use crate::compute::hierarchy::ActivityHierarchy;
use crate::compute::spatial::RegionQuery;
use orgdir_types::entity::{ActivityId, BuildingId, OrganizationId, OrganizationRecord};
use orgdir_types::query::{RadiusQuery, RectangleQuery};
use orgdir_types::tree::TreeNode;
use std::collections::BTreeSet;

/// Organizations located in the building.
pub fn by_building(records: &[OrganizationRecord], building_id: BuildingId) -> Vec<&OrganizationRecord> {
    records
        .iter()
        .filter(|record| record.organization.building_id == building_id)
        .collect()
}

/// Organizations tagged with exactly this activity. Descendants do not count.
pub fn by_activity<'r>(
    records: &'r [OrganizationRecord],
    hierarchy: &ActivityHierarchy<'_>,
    activity_id: ActivityId,
) -> Vec<&'r OrganizationRecord> {
    if !hierarchy.contains(activity_id) {
        return Vec::new();
    }
    records
        .iter()
        .filter(|record| record.organization.has_activity(activity_id))
        .collect()
}

/// Organizations tagged with the activity or any of its descendants.
pub fn by_activity_tree<'r>(
    records: &'r [OrganizationRecord],
    hierarchy: &ActivityHierarchy<'_>,
    activity_id: ActivityId,
) -> Vec<&'r OrganizationRecord> {
    let ids = hierarchy.descendant_ids(activity_id);
    tagged_with_any(records, &ids)
}

pub(crate) fn tagged_with_any<'r>(
    records: &'r [OrganizationRecord],
    ids: &BTreeSet<ActivityId>,
) -> Vec<&'r OrganizationRecord> {
    if ids.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|record| {
            record
                .organization
                .activity_ids
                .iter()
                .any(|id| ids.contains(id))
        })
        .collect()
}

/// Organizations whose building lies within the radius.
pub fn in_radius<'r>(records: &'r [OrganizationRecord], query: &RadiusQuery) -> Vec<&'r OrganizationRecord> {
    in_region(records, query)
}

/// Organizations whose building lies inside the rectangle.
pub fn in_rectangle<'r>(
    records: &'r [OrganizationRecord],
    query: &RectangleQuery,
) -> Vec<&'r OrganizationRecord> {
    in_region(records, query)
}

fn in_region<'r, Q: RegionQuery>(records: &'r [OrganizationRecord], query: &Q) -> Vec<&'r OrganizationRecord> {
    records
        .iter()
        .filter(|record| query.contains(&record.location()))
        .collect()
}

pub fn by_id(records: &[OrganizationRecord], id: OrganizationId) -> Option<&OrganizationRecord> {
    records.iter().find(|record| record.id() == id)
}

/// Case-insensitive substring match on the organization name.
///
/// The needle is literal text. An empty needle matches every organization.
pub fn by_name<'r>(records: &'r [OrganizationRecord], needle: &str) -> Vec<&'r OrganizationRecord> {
    let needle = needle.to_lowercase();
    records
        .iter()
        .filter(|record| name_matches(record.name(), &needle))
        .collect()
}

#[inline]
pub(crate) fn name_matches(name: &str, lowered_needle: &str) -> bool {
    name.to_lowercase().contains(lowered_needle)
}

/// The whole activity forest.
pub fn activity_tree(hierarchy: &ActivityHierarchy<'_>) -> Vec<TreeNode> {
    hierarchy.build_tree(None)
}
