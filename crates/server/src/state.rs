//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use orgdir::{Directory, MemoryStore};

use crate::config::ServerConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub directory: Arc<Directory<MemoryStore>>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig, directory: Directory<MemoryStore>) -> Self {
        Self {
            config: Arc::new(config),
            directory: Arc::new(directory),
            started_at: Instant::now(),
        }
    }

    /// Opens the directory described by `config`.
    pub fn open(config: ServerConfig) -> anyhow::Result<Self> {
        let directory = config.open_directory()?;
        Ok(Self::new(config, directory))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
