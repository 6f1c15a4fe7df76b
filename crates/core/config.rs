//! Configuration for the directory engine.
//!
//! Re-exports the entity types from `orgdir-types` for convenience.
use serde::de::Error;

pub use orgdir_types::entity::{
    Activity, ActivityId, Building, BuildingId, Organization, OrganizationId, OrganizationRecord,
    Phone, PhoneId,
};
pub use orgdir_types::query::{RadiusQuery, RectangleQuery};
pub use orgdir_types::stats::StoreStats;
pub use orgdir_types::tree::TreeNode;
pub use orgdir_types::{Dataset, GeoPoint};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Answer radius/rectangle intents through the R*-tree instead of a full scan
    #[serde(default = "Config::default_spatial_index")]
    pub spatial_index: bool,

    /// Longest accepted name-search substring, in characters
    #[serde(default = "Config::default_name_search_max_len")]
    pub name_search_max_len: usize,
}

impl Config {
    const fn default_spatial_index() -> bool {
        true
    }

    const fn default_name_search_max_len() -> usize {
        256
    }

    pub fn with_spatial_index(mut self, enabled: bool) -> Self {
        self.spatial_index = enabled;
        self
    }

    pub fn with_name_search_max_len(mut self, max_len: usize) -> Self {
        assert!(max_len > 0, "Name search length limit must be greater than zero");
        self.name_search_max_len = max_len;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name_search_max_len == 0 {
            return Err("Name search length limit must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spatial_index: Self::default_spatial_index(),
            name_search_max_len: Self::default_name_search_max_len(),
        }
    }
}
