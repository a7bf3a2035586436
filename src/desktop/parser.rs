//! Desktop file tokenizer adapter.
//!
//! Decoding the file format is left to `freedesktop_desktop_entry`; this
//! module converts the `[Desktop Entry]` group it produces into a typed
//! [`ParsedEntry`] for the link builder.

use crate::desktop::entry::{DESKTOP_ENTRY_GROUP, ParsedEntry, ParsedGroup, Value};
use crate::desktop::env::EnvironmentSet;
use crate::desktop::probe::ExecProbe;
use crate::error::LoadError;
use crate::link::{Link, LinkType, build};
use freedesktop_desktop_entry::DesktopEntry as FdEntry;
use std::path::Path;
use tracing::debug;

/// Keys decoded as plain strings.
const STRING_KEYS: &[&str] = &[
    "Exec",
    "TryExec",
    "URL",
    "Icon",
    "Path",
    "StartupWMClass",
];

/// Keys decoded as `true`/`false`.
const BOOLEAN_KEYS: &[&str] = &["NoDisplay", "Hidden", "Terminal", "StartupNotify"];

/// Keys decoded as `;`-separated environment lists.
const ENVIRONMENT_KEYS: &[&str] = &["OnlyShowIn", "NotShowIn"];

/// Read and decode a desktop file.
pub fn parse_desktop_file<L: AsRef<str>>(
    path: &Path,
    locales: &[L],
) -> Result<ParsedEntry, LoadError> {
    let content = std::fs::read_to_string(path).map_err(LoadError::ReadFailed)?;
    parse_desktop_str(path, &content, locales)
}

/// Decode desktop file contents.
///
/// Localized keys (`Name`, `GenericName`, `Comment`) are resolved against
/// `locales`, falling back to the unlocalized value.
pub fn parse_desktop_str<L: AsRef<str>>(
    path: &Path,
    content: &str,
    locales: &[L],
) -> Result<ParsedEntry, LoadError> {
    let fd_entry = FdEntry::from_str(path, content, None::<&[&str]>)?;

    let mut entry = ParsedEntry::new();
    let Some(source) = fd_entry.groups.desktop_entry() else {
        debug!(?path, "No [Desktop Entry] group");
        return Ok(entry);
    };

    let mut group = ParsedGroup::new();

    if let Some(literal) = source.entry("Type") {
        let value = match LinkType::from_literal(literal) {
            Some(link_type) => Value::Type(link_type),
            None => Value::String(literal.to_string()),
        };
        group.insert("Type", value);
    }

    let localized = [
        ("Name", fd_entry.name(locales)),
        ("GenericName", fd_entry.generic_name(locales)),
        ("Comment", fd_entry.comment(locales)),
    ];
    for (key, value) in localized {
        if let Some(value) = value {
            group.insert(key, Value::String(value.into_owned()));
        }
    }

    for &key in STRING_KEYS {
        if let Some(value) = source.entry(key) {
            group.insert(key, Value::String(value.to_string()));
        }
    }

    for &key in BOOLEAN_KEYS {
        if let Some(raw) = source.entry(key) {
            match parse_boolean(raw) {
                Some(value) => group.insert(key, Value::Boolean(value)),
                None => debug!(?path, key, raw, "Ignoring invalid boolean"),
            }
        }
    }

    for &key in ENVIRONMENT_KEYS {
        if let Some(raw) = source.entry(key) {
            group.insert(key, Value::Environments(EnvironmentSet::from_desktop_list(raw)));
        }
    }

    entry.insert_group(DESKTOP_ENTRY_GROUP, group);
    Ok(entry)
}

/// Load a desktop file and build a link from it.
pub fn load_link<L: AsRef<str>>(
    path: &Path,
    probe: &impl ExecProbe,
    locales: &[L],
) -> Result<Link, LoadError> {
    let mut entry = parse_desktop_file(path, locales)?;
    let link = build(&mut entry, probe)?;
    Ok(link)
}

fn parse_boolean(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
