//! Store connection configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{FridgetrackError, Result};

/// Environment variables consulted before the config file
const ENV_STORE_URL: &str = "FRIDGETRACK_STORE_URL";
const ENV_STORE_KEY: &str = "FRIDGETRACK_STORE_KEY";

/// Connection settings for the remote table store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Base URL of the table API (e.g. "https://xyz.example.co/rest/v1")
    pub base_url: String,
    /// API key sent as apikey / bearer headers
    #[serde(default)]
    pub api_key: Option<String>,
}

impl StoreConfig {
    /// Resolve the config: environment variables first, then
    /// ~/.fridgetrack/config.json
    pub fn load() -> Result<Self> {
        if let Ok(base_url) = std::env::var(ENV_STORE_URL) {
            return Ok(Self {
                base_url,
                api_key: std::env::var(ENV_STORE_KEY).ok(),
            });
        }
        Self::from_file(&Self::default_path()?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            FridgetrackError::Config(format!("invalid config {}: {e}", path.display()))
        })
    }

    /// ~/.fridgetrack/config.json
    fn default_path() -> Result<PathBuf> {
        let home = directories::UserDirs::new()
            .ok_or_else(|| FridgetrackError::Config("Failed to get home directory".into()))?
            .home_dir()
            .to_path_buf();
        Ok(home.join(".fridgetrack").join("config.json"))
    }
}
