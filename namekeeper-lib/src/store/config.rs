use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Result,
    fs::{config_dir, state_dir},
};

const CURRENT_CONFIG_VERSION: u16 = 1;
const FILE_NAME: &str = "core.toml";
const DB_FILE_NAME: &str = "names.db";

/// The backend's core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    version: u16,
    /// Where the database file lives. Defaults to the XDG state directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    database_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Load the configuration from the user's config directory, writing out the defaults if the
    /// file doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?.join(FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring unreadable config at {}: {e}", path.display());
                Self::default()
            }))
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(state_dir()?.join(DB_FILE_NAME)),
        }
    }

    pub fn set_database_path(&mut self, path: impl Into<PathBuf>) {
        self.database_path = Some(path.into());
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            database_path: None,
        }
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::CoreConfig;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("core.toml");

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg, CoreConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_database_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("core.toml");

        let mut cfg = CoreConfig::default();
        cfg.set_database_path(dir.path().join("elsewhere.db"));
        cfg.save_to(&path).unwrap();

        let loaded = CoreConfig::load_from(&path).unwrap();
        assert_eq!(
            loaded.database_path().unwrap(),
            dir.path().join("elsewhere.db")
        );
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("core.toml");
        fs::write(&path, "version = [not toml").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg, CoreConfig::default());
        // The broken file is left alone
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = [not toml");
    }
}
