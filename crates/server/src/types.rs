//! Request and response bodies.

use chrono::{DateTime, Utc};
use orgdir::{Building, Catalog, OrganizationRecord, TreeNode};
use serde::{Deserialize, Serialize};

pub use orgdir::{RadiusQuery, RectangleQuery};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingResponse {
    pub id: i64,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Building> for BuildingResponse {
    fn from(building: &Building) -> Self {
        Self {
            id: building.id,
            address: building.address.clone(),
            latitude: building.latitude,
            longitude: building.longitude,
            created_at: building.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneResponse {
    pub phone_number: String,
}

/// An organization with its building, activities (each with its nested
/// subtree) and phones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub id: i64,
    pub name: String,
    pub building_id: i64,
    pub building: BuildingResponse,
    pub activities: Vec<TreeNode>,
    pub phones: Vec<PhoneResponse>,
    pub created_at: DateTime<Utc>,
}

impl OrganizationResponse {
    pub fn from_record(record: &OrganizationRecord, catalog: &Catalog) -> Self {
        let organization = &record.organization;
        Self {
            id: organization.id,
            name: organization.name.clone(),
            building_id: organization.building_id,
            building: BuildingResponse::from(&record.building),
            activities: organization
                .activity_ids
                .iter()
                .filter_map(|&id| catalog.activity_view(id))
                .collect(),
            phones: organization
                .phones
                .iter()
                .map(|phone| PhoneResponse {
                    phone_number: phone.phone_number.clone(),
                })
                .collect(),
            created_at: organization.created_at,
        }
    }

    pub fn list(records: Vec<&OrganizationRecord>, catalog: &Catalog) -> Vec<Self> {
        records
            .into_iter()
            .map(|record| Self::from_record(record, catalog))
            .collect()
    }
}

/// Query string of the name search.
#[derive(Debug, Clone, Deserialize)]
pub struct NameSearchParams {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub buildings: usize,
    pub activities: usize,
    pub organizations: usize,
    pub phones: usize,
}
