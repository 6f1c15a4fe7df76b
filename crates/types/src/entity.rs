//! Directory entities: buildings, activities, organizations and phones.

use crate::geo::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type BuildingId = i64;
pub type ActivityId = i64;
pub type OrganizationId = i64;
pub type PhoneId = i64;

/// A building with an address and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub address: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl Building {
    pub fn new(id: BuildingId, address: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            address: address.into(),
            latitude,
            longitude,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A node of the activity taxonomy.
///
/// Parent links form a forest. Children are never stored; they are derived
/// from the parent ids of the other nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    /// Informational depth, 1 for roots
    pub level: i32,
    #[serde(default)]
    pub parent_id: Option<ActivityId>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        id: ActivityId,
        name: impl Into<String>,
        level: i32,
        parent_id: Option<ActivityId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            parent_id,
            created_at: Utc::now(),
        }
    }

    pub fn root(id: ActivityId, name: impl Into<String>) -> Self {
        Self::new(id, name, 1, None)
    }
}

/// A phone number owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub id: PhoneId,
    pub organization_id: OrganizationId,
    pub phone_number: String,
}

/// An organization located in exactly one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub building_id: BuildingId,
    /// Tagged activities, in tagging order without duplicates
    #[serde(default)]
    pub activity_ids: Vec<ActivityId>,
    #[serde(default)]
    pub phones: Vec<Phone>,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(id: OrganizationId, name: impl Into<String>, building_id: BuildingId) -> Self {
        Self {
            id,
            name: name.into(),
            building_id,
            activity_ids: Vec::new(),
            phones: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_activities(mut self, activity_ids: impl IntoIterator<Item = ActivityId>) -> Self {
        for id in activity_ids {
            self.tag(id);
        }
        self
    }

    /// Tag the organization with an activity. Returns false if it was already tagged.
    pub fn tag(&mut self, activity_id: ActivityId) -> bool {
        if self.activity_ids.contains(&activity_id) {
            return false;
        }
        self.activity_ids.push(activity_id);
        true
    }

    #[inline]
    pub fn has_activity(&self, activity_id: ActivityId) -> bool {
        self.activity_ids.contains(&activity_id)
    }
}

/// One row of an organizations snapshot: the organization with its building resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub organization: Organization,
    pub building: Building,
}

impl OrganizationRecord {
    pub fn new(organization: Organization, building: Building) -> Self {
        Self {
            organization,
            building,
        }
    }

    #[inline]
    pub fn id(&self) -> OrganizationId {
        self.organization.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.organization.name
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        self.building.location()
    }
}
