use std::{fs, path::Path};

use namekeeper_lib::fs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::theme::Theme;

pub mod theme;

const CURRENT_CONFIG_VERSION: u16 = 1;
const FILE_NAME: &str = "gui.toml";

/// The frontend's configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub version: u16,
    pub theme: Theme,
    /// Shown in the name field until a saved name has been loaded
    pub default_text: String,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            theme: Theme::default(),
            default_text: "Enter your name".into(),
        }
    }
}

impl GuiConfig {
    /// Load the config from the user's config directory. Any failure is logged and the defaults
    /// are used instead.
    pub fn load() -> Self {
        config_dir()
            .and_then(|dir| Self::load_from(&dir.join(FILE_NAME)))
            .unwrap_or_else(|e| {
                warn!("Using default GUI config: {e}");
                Self::default()
            })
    }

    pub fn load_from(path: &Path) -> namekeeper_lib::Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring unreadable GUI config at {}: {e}", path.display());
                Self::default()
            }))
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save_to(&self, path: &Path) -> namekeeper_lib::Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }

    pub fn theme(&self) -> iced::Theme {
        (&self.theme).into()
    }
}
