use serde::{Deserialize, Serialize};

/// Entity counts of a directory store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub buildings: usize,
    pub activities: usize,
    pub organizations: usize,
    pub phones: usize,
    /// Number of mutations applied since the store was created
    pub generation: u64,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings == 0 && self.activities == 0 && self.organizations == 0
    }
}
