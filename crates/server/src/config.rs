//! Server configuration.

use anyhow::Context;
use clap::{ArgAction, Parser};
use orgdir::{Config, Directory, DirectoryBuilder, MemoryStore};
use std::path::PathBuf;

/// Key accepted when none is configured.
pub const DEFAULT_API_KEY: &str = "test-api-key-12345";

/// HTTP server configuration, from flags or `ORGDIR_*` environment variables.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Organization directory HTTP API", long_about = None)]
pub struct ServerConfig {
    #[arg(long, env = "ORGDIR_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "ORGDIR_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Shared secret expected in the X-API-Key header
    #[arg(long, env = "ORGDIR_API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true)]
    pub api_key: String,

    /// JSON dataset to load at startup
    #[arg(short, long, env = "ORGDIR_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Seed the demo directory when the dataset is empty or absent
    #[arg(long, env = "ORGDIR_DEMO", default_value_t = true, action = ArgAction::Set)]
    pub demo: bool,

    /// Engine configuration file (.json or .toml)
    #[arg(short, long, env = "ORGDIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Allowed CORS origins, `*` for any
    #[arg(
        long = "cors-origin",
        env = "ORGDIR_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset = Some(path.into());
        self
    }

    pub fn with_demo(mut self, enabled: bool) -> Self {
        self.demo = enabled;
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reads the engine configuration file, or the defaults when none is set.
    pub fn engine_config(&self) -> anyhow::Result<Config> {
        let Some(path) = &self.config else {
            return Ok(Config::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Config::from_json(&text)?,
            _ => Config::from_toml(&text)?,
        };
        Ok(config)
    }

    /// Opens the directory this server will answer from.
    pub fn open_directory(&self) -> anyhow::Result<Directory<MemoryStore>> {
        let mut builder = DirectoryBuilder::new()
            .config(self.engine_config()?)
            .demo_data(self.demo);

        if let Some(path) = &self.dataset {
            builder = builder.dataset_path(path);
        }

        builder
            .build()
            .context("failed to open the organization directory")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            api_key: DEFAULT_API_KEY.to_string(),
            dataset: None,
            demo: true,
            config: None,
            cors_origins: vec!["*".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.api_key, DEFAULT_API_KEY);
        assert!(config.demo);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_parse_flags() {
        let config = ServerConfig::try_parse_from([
            "orgdir-server",
            "--port",
            "9000",
            "--api-key",
            "secret",
            "--demo",
            "false",
            "--cors-origin",
            "http://localhost:3000,http://localhost:5173",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.api_key, "secret");
        assert!(!config.demo);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_engine_config_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orgdir.toml");
        std::fs::write(&path, "spatial_index = false\n").unwrap();

        let config = ServerConfig {
            config: Some(path),
            ..ServerConfig::default()
        };
        let engine = config.engine_config().unwrap();
        assert!(!engine.spatial_index);
        assert_eq!(engine.name_search_max_len, 256);
    }

    #[test]
    fn test_engine_config_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orgdir.json");
        std::fs::write(&path, r#"{"spatial_index": true, "shards": 4}"#).unwrap();

        let config = ServerConfig {
            config: Some(path),
            ..ServerConfig::default()
        };
        assert!(config.engine_config().is_err());
    }

    #[test]
    fn test_open_directory_without_demo() {
        let directory = ServerConfig::default().with_demo(false).open_directory().unwrap();
        assert!(directory.store().is_empty());
    }
}
