//! Application configuration management.
//!
//! Configuration is stored at `~/.config/platecache/config.json` and
//! holds the remote endpoint base URL plus an optional override for the
//! directory the record store and asset cache bucket live under.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::assets::BUCKET_NAME;
use crate::store::STORE_NAME;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "platecache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default remote endpoint, matching the development data server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    fn resolved_data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Directory for the record store database.
    pub fn store_dir(&self) -> Result<PathBuf> {
        Ok(self.resolved_data_dir()?.join(STORE_NAME))
    }

    /// Directory for the asset cache bucket.
    pub fn asset_cache_dir(&self) -> Result<PathBuf> {
        Ok(self.resolved_data_dir()?.join(BUCKET_NAME))
    }
}
