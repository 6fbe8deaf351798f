use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::{tg_debug, Error, Result};

/// Ambient settings shared by the components embedding this crate.
///
/// The model itself takes everything it needs through its operations; the
/// config only carries scheduler-side defaults, like the output directory
/// handed to `Task::initialize` when a job does not specify one.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    pub output_dir: Option<String>,
}

impl Config {
    pub fn grid_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".taskgrid"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::grid_dir()?.join("taskgrid.toml"))
    }

    /// Output directory handed to tasks that do not carry their own.
    pub fn effective_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => expand_tilde(dir),
            None => PathBuf::from("."),
        }
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        tg_debug!("Config::load path={}", path.display());
        if !path.exists() {
            tg_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(&path)?)?;
        tg_debug!(
            "Config loaded: debug={}, output_dir={:?}",
            config.debug,
            config.output_dir
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let grid_dir = Self::grid_dir()?;
        tg_debug!("Config::save grid_dir={}", grid_dir.display());
        if !grid_dir.exists() {
            fs::create_dir_all(&grid_dir)?;
        }
        let path = Self::config_path()?;
        fs::write(&path, toml::to_string_pretty(self)?)?;
        tg_debug!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn ensure_dirs() -> Result<()> {
        let grid_dir = Self::grid_dir()?;
        if !grid_dir.exists() {
            tg_debug!("Creating taskgrid directory: {}", grid_dir.display());
            fs::create_dir_all(&grid_dir)?;
        }
        Ok(())
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
