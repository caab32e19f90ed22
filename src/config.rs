// Configuration: where the SQLite database lives.
// Resolution order: the `CAMPUS_EATS_DB` environment variable, then an
// optional JSON config file in the user's home directory, then a default
// path next to that config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_DB: &str = "CAMPUS_EATS_DB";
const CONFIG_DIR: &str = ".campus-eats";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_DB_FILE: &str = "campus-eats.db";

/// On-disk configuration, all fields optional.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Load `~/.campus-eats/config.json` if it exists, otherwise defaults.
    pub fn load() -> Result<Self> {
        let path = config_dir().join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the database location, applying the environment override.
    pub fn database_url(&self) -> String {
        if let Ok(url) = std::env::var(ENV_DB) {
            return url;
        }
        self.database_path
            .clone()
            .unwrap_or_else(|| config_dir().join(DEFAULT_DB_FILE))
            .to_string_lossy()
            .into_owned()
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
}
