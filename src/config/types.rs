//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Locales used to resolve localized keys, most preferred first.
    /// Empty means "derive from the environment".
    pub locales: Vec<String>,
    /// Override for `XDG_CURRENT_DESKTOP`, `:`-separated.
    pub current_desktop: Option<String>,
    /// Probe `TryExec` programs when building links.
    pub try_exec: bool,
    /// Directories searched for `TryExec` programs instead of `PATH`.
    pub search_path: Option<Vec<PathBuf>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            current_desktop: None,
            try_exec: true,
            search_path: None,
        }
    }
}
