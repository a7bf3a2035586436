//! Configuration validation utilities.
//!
//! Provides validation for configuration values, returning warnings for
//! non-fatal issues that should be logged but don't prevent startup.

use super::types::AppConfig;
use crate::desktop::env::Environment;

/// Non-fatal validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    /// The field that has an issue.
    pub field: String,
    /// A description of the issue.
    pub message: String,
}

/// Validate the entire config, returning warnings for non-fatal issues.
///
/// This function checks for:
/// - Desktop names in `current_desktop` that are not registered
/// - Relative or missing `search_path` directories
/// - Blank locale strings
pub fn validate_config(config: &AppConfig) -> Vec<ValidationWarning> {
    let mut warnings = vec![];

    if let Some(current) = &config.current_desktop {
        for name in current.split(':').filter(|n| !n.is_empty()) {
            if Environment::from_name(name).is_none() {
                warnings.push(ValidationWarning {
                    field: "current_desktop".to_string(),
                    message: format!(
                        "Desktop '{}' is not a known environment. OnlyShowIn/NotShowIn will not match it.",
                        name
                    ),
                });
            }
        }
    }

    if let Some(dirs) = &config.search_path {
        for dir in dirs {
            if dir.is_relative() {
                warnings.push(ValidationWarning {
                    field: "search_path".to_string(),
                    message: format!(
                        "Directory {:?} is relative and will be resolved against the working directory.",
                        dir
                    ),
                });
            } else if !dir.is_dir() {
                warnings.push(ValidationWarning {
                    field: "search_path".to_string(),
                    message: format!("Directory {:?} does not exist.", dir),
                });
            }
        }
    }

    if config.locales.iter().any(|l| l.trim().is_empty()) {
        warnings.push(ValidationWarning {
            field: "locales".to_string(),
            message: "Blank locale entries are ignored.".to_string(),
        });
    }

    warnings
}
