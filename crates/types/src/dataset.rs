//! Serializable form of a whole directory.

use crate::entity::{Activity, Building, Organization};
use serde::{Deserialize, Serialize};

/// Every entity of a directory, in insertion order.
///
/// Organizations carry their activity ids and phones inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() && self.activities.is_empty() && self.organizations.is_empty()
    }

    pub fn phone_count(&self) -> usize {
        self.organizations.iter().map(|org| org.phones.len()).sum()
    }
}
