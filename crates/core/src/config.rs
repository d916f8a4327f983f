//! Engine configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) yields a working configuration.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Name of the configuration file inside the project config directory
pub const CONFIG_FILE_NAME: &str = "timetable.toml";

/// Name of the database file inside the project data directory
pub const DATABASE_FILE_NAME: &str = "timetable.db";

/// Which date the lunch and break windows are anchored to during generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WindowAnchoring {
    /// Windows are computed once against the generation date and reused for
    /// every day of the cycle. Lunch and break slots of days 2..6 therefore
    /// land on the first day, and the cursor follows them there.
    #[default]
    Fixed,
    /// Windows are re-derived on each iterated day.
    PerDay,
}

/// Timetable engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_anchoring: WindowAnchoring,
    /// Reject malformed schedules before generating
    pub validate_schedules: bool,
    /// Database location; the project data directory is used when unset
    pub database_path: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_anchoring: WindowAnchoring::Fixed,
            validate_schedules: false,
            database_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), anchoring = ?config.window_anchoring, "Loaded configuration");
        Ok(config)
    }

    /// Load from an explicit path, else from the project config directory if
    /// the file exists there, else fall back to defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(dirs) = project_dirs() {
            let path = dirs.config_dir().join(CONFIG_FILE_NAME);
            if path.is_file() {
                return Self::load(&path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Effective database path
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;
        Ok(dirs.data_dir().join(DATABASE_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "school", "timetable")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.window_anchoring, WindowAnchoring::Fixed);
    }

    #[test]
    fn test_parse_config() {
        let config = EngineConfig::from_toml_str(
            r#"
            window_anchoring = "per_day"
            validate_schedules = true
            database_path = "/tmp/school.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.window_anchoring, WindowAnchoring::PerDay);
        assert!(config.validate_schedules);
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/school.db"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_unknown_anchoring_rejected() {
        let result = EngineConfig::from_toml_str(r#"window_anchoring = "weekly""#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "log_filter = \"debug\"\n").unwrap();

        let config = EngineConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        let result = EngineConfig::discover(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
