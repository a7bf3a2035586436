//! Configuration loading.
//!
//! The config lives at `~/.config/desklink/config.toml`. A missing file
//! means defaults; a file that cannot be read or parsed is reported and
//! also falls back to defaults.

mod types;
mod validation;

pub use types::AppConfig;
pub use validation::{ValidationWarning, validate_config};

use crate::desktop::env::{EnvironmentSet, current_desktop, parse_current_desktop};
use crate::desktop::probe::PathProbe;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("desklink"))
}

/// Path of the default config file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoDirFound)
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFailed)?;
    toml::from_str(&content).map_err(ConfigError::ParseFailed)
}

/// Load the config from `path`, or from the default location.
///
/// Never fails: problems are logged and defaults are used instead.
/// Validation warnings are logged as well.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                return AppConfig::default();
            }
        },
    };

    if !path.exists() {
        tracing::debug!("Config file not found at {:?}, using defaults", path);
        return AppConfig::default();
    }

    let config = match read_config(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::warn!("{} ({:?}), using defaults", e, path);
            return AppConfig::default();
        }
    };

    for warning in validate_config(&config) {
        tracing::warn!("Config validation: {} - {}", warning.field, warning.message);
    }

    config
}

impl AppConfig {
    /// Locales to resolve localized keys with.
    pub fn effective_locales(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .locales
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        if configured.is_empty() {
            freedesktop_desktop_entry::get_languages_from_env()
        } else {
            configured
        }
    }

    /// The current desktop, from the override or the session.
    pub fn current_desktop(&self) -> EnvironmentSet {
        match &self.current_desktop {
            Some(value) => parse_current_desktop(value),
            None => current_desktop(),
        }
    }

    /// The probe used for `TryExec`.
    pub fn probe(&self) -> PathProbe {
        match &self.search_path {
            Some(dirs) => PathProbe::new(dirs.clone()),
            None => PathProbe::from_session(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "try_exec = false\n").unwrap();

        let config = read_config(&path).unwrap();
        assert!(!config.try_exec);
    }

    #[test]
    fn test_read_config_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "try_exec = \"sometimes\"\n").unwrap();

        assert!(matches!(read_config(&path), Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn test_read_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_config(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFailed(_))));
    }

    #[test]
    fn test_load_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(load_config(Some(&missing)), AppConfig::default());

        let invalid = dir.path().join("invalid.toml");
        std::fs::write(&invalid, "locales = 3\n").unwrap();
        assert_eq!(load_config(Some(&invalid)), AppConfig::default());
    }

    #[test]
    fn test_effective_locales_prefers_configured() {
        let config = AppConfig {
            locales: vec!["fr".to_string(), "".to_string()],
            ..AppConfig::default()
        };
        assert_eq!(config.effective_locales(), vec!["fr".to_string()]);
    }

    #[test]
    fn test_current_desktop_override() {
        let config = AppConfig {
            current_desktop: Some("XFCE".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.current_desktop(), EnvironmentSet::XFCE);
    }

    #[test]
    fn test_probe_uses_search_path() {
        let config = AppConfig {
            search_path: Some(vec![PathBuf::from("/opt/bin")]),
            ..AppConfig::default()
        };
        assert_eq!(config.probe().search_path(), &[PathBuf::from("/opt/bin")]);
    }
}
