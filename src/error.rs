//! Domain-specific error types for desklink.
//!
//! Building a link from a parsed entry, loading an entry from disk and
//! reading the configuration each get their own error type so callers can
//! decide whether to skip a file, log it, or surface it to the user.

use thiserror::Error;

/// Errors produced while turning a parsed entry into a [`Link`](crate::link::Link).
///
/// All of these are permanent for the entry in question: retrying the same
/// input yields the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The entry has no `[Desktop Entry]` group.
    #[error("Missing [Desktop Entry] group")]
    MissingGroup,

    /// A key required for the entry's type is absent.
    #[error("Missing required key '{0}'")]
    MissingRequiredField(&'static str),

    /// The `Type` key holds a literal that is not a known entry type.
    #[error("Unrecognized entry type '{0}'")]
    UnrecognizedType(String),
}

/// Errors produced while loading a desktop file from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to read the desktop file.
    #[error("Failed to read desktop file: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// The tokenizer rejected the file contents.
    #[error("Failed to decode desktop file: {0}")]
    DecodeFailed(#[from] freedesktop_desktop_entry::DecodeError),

    /// The decoded entry did not describe a valid link.
    #[error("Invalid desktop entry: {0}")]
    Invalid(#[from] BuildError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config directory could not be determined.
    #[error("Config directory not found")]
    NoDirFound,

    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// Failed to parse the config file.
    #[error("Failed to parse config: {0}")]
    ParseFailed(#[source] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_messages() {
        assert_eq!(
            BuildError::MissingGroup.to_string(),
            "Missing [Desktop Entry] group"
        );
        assert_eq!(
            BuildError::MissingRequiredField("Exec").to_string(),
            "Missing required key 'Exec'"
        );
        assert_eq!(
            BuildError::UnrecognizedType("Service".to_string()).to_string(),
            "Unrecognized entry type 'Service'"
        );
    }

    #[test]
    fn test_load_error_wraps_build_error() {
        let err: LoadError = BuildError::MissingGroup.into();
        assert!(matches!(err, LoadError::Invalid(BuildError::MissingGroup)));
        assert_eq!(
            err.to_string(),
            "Invalid desktop entry: Missing [Desktop Entry] group"
        );
    }
}
