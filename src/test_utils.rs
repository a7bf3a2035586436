//! Test utilities and mock factories.
//!
//! Only compiled in test builds.

use crate::desktop::entry::{DESKTOP_ENTRY_GROUP, ParsedEntry, ParsedGroup, Value};
use crate::link::LinkType;

/// A probe that reports every program as available.
pub fn always() -> impl Fn(&str) -> bool {
    |_: &str| true
}

/// A probe that reports every program as unavailable.
pub fn never() -> impl Fn(&str) -> bool {
    |_: &str| false
}

/// Create a parsed entry with a `[Desktop Entry]` group holding `Type` and,
/// if given, `Name`.
pub fn mock_entry(link_type: LinkType, name: Option<&str>) -> ParsedEntry {
    let mut group = ParsedGroup::new();
    group.insert("Type", Value::Type(link_type));
    if let Some(name) = name {
        group.insert("Name", Value::String(name.to_string()));
    }

    let mut entry = ParsedEntry::new();
    entry.insert_group(DESKTOP_ENTRY_GROUP, group);
    entry
}

/// Create a parsed application entry with the given name and command.
pub fn mock_application_entry(name: &str, exec: &str) -> ParsedEntry {
    let mut entry = mock_entry(LinkType::Application, Some(name));
    if let Some(group) = entry.desktop_entry_mut() {
        group.insert("Exec", Value::String(exec.to_string()));
    }
    entry
}

/// Contents of a typical application desktop file.
pub const FIREFOX_DESKTOP: &str = "\
[Desktop Entry]
Version=1.0
Type=Application
Name=Firefox
Name[de]=Firefox Browser
GenericName=Web Browser
Comment=Browse the World Wide Web
Exec=firefox %u
TryExec=firefox
Icon=firefox
Terminal=false
StartupNotify=true
OnlyShowIn=GNOME;KDE;
NotShowIn=XFCE;
Path=/opt/firefox

[Desktop Action new-window]
Name=New Window
Exec=firefox --new-window
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_entry() {
        let entry = mock_entry(LinkType::Url, Some("Example"));
        let group = entry.desktop_entry().unwrap();
        assert_eq!(group.get("Type"), Some(&Value::Type(LinkType::Url)));
        assert_eq!(group.string("Name"), Some("Example"));
    }

    #[test]
    fn test_mock_entry_without_name() {
        let entry = mock_entry(LinkType::Directory, None);
        assert!(!entry.desktop_entry().unwrap().contains("Name"));
    }

    #[test]
    fn test_mock_application_entry() {
        let entry = mock_application_entry("Editor", "vim");
        assert_eq!(entry.desktop_entry().unwrap().string("Exec"), Some("vim"));
    }

    #[test]
    fn test_probes() {
        assert!(always()("anything"));
        assert!(!never()("anything"));
    }
}
