//! Directory builder.
//!
//! Assembles a [`Directory`] over a [`MemoryStore`], optionally loaded from a
//! dataset file and seeded with the demo directory.

use crate::config::Config;
use crate::directory::Directory;
use crate::error::{DirectoryError, Result};
use crate::storage::seed::seed_demo;
use crate::storage::{DatasetFile, MemoryStore};
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct DirectoryBuilder {
    config: Config,
    dataset_path: Option<PathBuf>,
    demo_data: bool,
}

impl DirectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load the store from this JSON dataset. A missing file starts empty.
    pub fn dataset_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    /// Seed the demo directory when the store would otherwise start empty.
    pub fn demo_data(mut self, enabled: bool) -> Self {
        self.demo_data = enabled;
        self
    }

    pub fn build(self) -> Result<Directory<MemoryStore>> {
        self.config.validate().map_err(DirectoryError::Config)?;

        let store = match &self.dataset_path {
            Some(path) => MemoryStore::from_dataset(DatasetFile::new(path).load()?)?,
            None => MemoryStore::new(),
        };

        if self.demo_data {
            if store.is_empty() {
                seed_demo(&store)?;
            } else {
                log::debug!("Store already has data, skipping demo seed");
            }
        }

        Ok(Directory::new(store, self.config))
    }
}
