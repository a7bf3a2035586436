//! Validated, shared descriptors of launchable desktop entries.
//!
//! A [`Link`] is built once from a parsed desktop entry by [`build`] and is
//! read-only afterwards. Handles are shared with [`Link::acquire`] and given
//! up with [`Link::release`]; the record is dropped together with the last
//! handle.

mod builder;

pub use builder::build;

use crate::desktop::env::EnvironmentSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// The kind of launchable item an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    Application,
    #[serde(rename = "Link")]
    Url,
    Directory,
}

impl LinkType {
    /// Map a `Type=` literal to a link type.
    ///
    /// URL shortcuts are spelled `Link` in desktop files.
    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "Application" => Some(LinkType::Application),
            "Link" => Some(LinkType::Url),
            "Directory" => Some(LinkType::Directory),
            _ => None,
        }
    }

    /// The `Type=` literal for this link type.
    pub fn literal(self) -> &'static str {
        match self {
            LinkType::Application => "Application",
            LinkType::Url => "Link",
            LinkType::Directory => "Directory",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

/// How an application reports that it finished starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StartupNotify {
    /// `StartupNotify` was not given; the application may or may not support it.
    #[default]
    LegacySupport,
    /// The application sends a startup notification.
    ProtocolSupport,
    /// The application never sends a startup notification.
    NoSupport,
}

/// What kind of arguments an application's command line accepts.
///
/// Classifying the command line is not implemented, so this is always
/// [`AppOpen::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppOpen {
    #[default]
    Unknown,
    SingleFile,
    MultipleFiles,
    SingleUrl,
    MultipleUrls,
}

/// Application-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    pub exec: String,
    pub working_dir: Option<String>,
    pub terminal: bool,
    pub open: AppOpen,
    pub mime_types: Vec<String>,
    pub startup: StartupNotify,
    pub startup_wm_class: Option<String>,
}

impl AppData {
    pub fn new(exec: String) -> Self {
        Self {
            exec,
            working_dir: None,
            terminal: false,
            open: AppOpen::Unknown,
            mime_types: Vec::new(),
            startup: StartupNotify::LegacySupport,
            startup_wm_class: None,
        }
    }
}

/// URL-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlData {
    pub address: String,
}

/// Type-specific payload of a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LinkData {
    Application(AppData),
    #[serde(rename = "Link")]
    Url(UrlData),
    Directory,
}

impl LinkData {
    pub fn link_type(&self) -> LinkType {
        match self {
            LinkData::Application(_) => LinkType::Application,
            LinkData::Url(_) => LinkType::Url,
            LinkData::Directory => LinkType::Directory,
        }
    }
}

/// The fields of a link, shared between handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub name: String,
    pub visible: bool,
    pub deleted: bool,
    pub generic_name: Option<String>,
    pub comment: Option<String>,
    pub icon: Option<String>,
    pub env_required: EnvironmentSet,
    pub env_restricted: EnvironmentSet,
    pub data: LinkData,
}

impl LinkInfo {
    pub fn new(name: String, data: LinkData) -> Self {
        Self {
            name,
            visible: true,
            deleted: false,
            generic_name: None,
            comment: None,
            icon: None,
            env_required: EnvironmentSet::empty(),
            env_restricted: EnvironmentSet::empty(),
            data,
        }
    }
}

/// A shared handle to a validated desktop entry.
///
/// Handles are reference counted without atomics, so a link stays on the
/// thread that built it.
#[derive(Debug)]
pub struct Link {
    inner: Rc<LinkInfo>,
}

impl Link {
    pub(crate) fn new(info: LinkInfo) -> Self {
        Self {
            inner: Rc::new(info),
        }
    }

    /// Take another reference to this link.
    pub fn acquire(&self) -> Link {
        Link {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Give up this reference. The link is destroyed when the last
    /// reference is released.
    pub fn release(self) {
        drop(self);
    }

    /// Number of live references to this link.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    pub fn info(&self) -> &LinkInfo {
        &self.inner
    }

    pub fn link_type(&self) -> LinkType {
        self.inner.data.link_type()
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether the entry should be listed. False when `NoDisplay` is set or
    /// the `TryExec` program is unavailable.
    pub fn visible(&self) -> bool {
        self.inner.visible
    }

    /// Whether the entry has been removed for the current user (`Hidden`).
    pub fn deleted(&self) -> bool {
        self.inner.deleted
    }

    pub fn generic_name(&self) -> Option<&str> {
        self.inner.generic_name.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.inner.comment.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.inner.icon.as_deref()
    }

    /// Environments of which at least one must be current (`OnlyShowIn`).
    pub fn env_required(&self) -> EnvironmentSet {
        self.inner.env_required
    }

    /// Environments none of which may be current (`NotShowIn`).
    pub fn env_restricted(&self) -> EnvironmentSet {
        self.inner.env_restricted
    }

    pub fn data(&self) -> &LinkData {
        &self.inner.data
    }

    pub fn app(&self) -> Option<&AppData> {
        match &self.inner.data {
            LinkData::Application(app) => Some(app),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&UrlData> {
        match &self.inner.data {
            LinkData::Url(url) => Some(url),
            _ => None,
        }
    }

    /// Whether the environment restrictions allow showing the link in
    /// `current`.
    pub fn shown_in(&self, current: EnvironmentSet) -> bool {
        let required = self.env_required();
        let restricted = self.env_restricted();

        (required.is_empty() || required.intersects(current)) && !restricted.intersects(current)
    }

    /// Whether a launcher running in `current` should list this link.
    pub fn should_show(&self, current: EnvironmentSet) -> bool {
        self.visible() && !self.deleted() && self.shown_in(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(name: &str) -> Link {
        Link::new(LinkInfo::new(name.to_string(), LinkData::Directory))
    }

    #[test]
    fn test_link_type_literals() {
        assert_eq!(LinkType::from_literal("Application"), Some(LinkType::Application));
        assert_eq!(LinkType::from_literal("Link"), Some(LinkType::Url));
        assert_eq!(LinkType::from_literal("Directory"), Some(LinkType::Directory));
        assert_eq!(LinkType::from_literal("application"), None);
        assert_eq!(LinkType::Url.to_string(), "Link");
    }

    #[test]
    fn test_link_type_serializes_as_literal() {
        for link_type in [LinkType::Application, LinkType::Url, LinkType::Directory] {
            let json = serde_json::to_value(link_type).unwrap();
            assert_eq!(json, link_type.literal());
        }

        let data = LinkData::Url(UrlData {
            address: "https://example.org".to_string(),
        });
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "Link");
        assert_eq!(json["address"], "https://example.org");
    }

    #[test]
    fn test_new_link_has_single_reference() {
        let link = directory("Games");
        assert_eq!(link.ref_count(), 1);

        let weak = Rc::downgrade(&link.inner);
        link.release();
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_acquire_release_lifetime() {
        let link = directory("Games");
        let weak = Rc::downgrade(&link.inner);

        let second = link.acquire();
        let third = link.acquire();
        assert_eq!(link.ref_count(), 3);

        second.release();
        assert_eq!(link.ref_count(), 2);
        third.release();
        assert_eq!(link.ref_count(), 1);
        assert!(weak.upgrade().is_some());

        link.release();
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_acquired_handles_share_data() {
        let link = directory("Games");
        let other = link.acquire();
        assert!(std::ptr::eq(link.info(), other.info()));
        assert_eq!(other.name(), "Games");
    }

    #[test]
    fn test_payload_accessors() {
        let app = Link::new(LinkInfo::new(
            "Editor".to_string(),
            LinkData::Application(AppData::new("vim".to_string())),
        ));
        assert_eq!(app.link_type(), LinkType::Application);
        assert_eq!(app.app().map(|a| a.exec.as_str()), Some("vim"));
        assert!(app.url().is_none());

        let dir = directory("Games");
        assert_eq!(dir.link_type(), LinkType::Directory);
        assert!(dir.app().is_none());
        assert!(dir.url().is_none());
    }

    #[test]
    fn test_shown_in() {
        let mut info = LinkInfo::new("Settings".to_string(), LinkData::Directory);
        info.env_required = EnvironmentSet::GNOME | EnvironmentSet::XFCE;
        info.env_restricted = EnvironmentSet::KDE;
        let link = Link::new(info);

        assert!(link.shown_in(EnvironmentSet::GNOME));
        assert!(!link.shown_in(EnvironmentSet::OPENBOX));
        assert!(!link.shown_in(EnvironmentSet::GNOME | EnvironmentSet::KDE));
        assert!(!link.shown_in(EnvironmentSet::empty()));
    }

    #[test]
    fn test_unrestricted_link_shown_everywhere() {
        let link = directory("Games");
        assert!(link.shown_in(EnvironmentSet::empty()));
        assert!(link.shown_in(EnvironmentSet::KDE));
    }

    #[test]
    fn test_should_show_respects_flags() {
        let mut info = LinkInfo::new("Old".to_string(), LinkData::Directory);
        info.deleted = true;
        assert!(!Link::new(info).should_show(EnvironmentSet::empty()));

        let mut info = LinkInfo::new("Hidden".to_string(), LinkData::Directory);
        info.visible = false;
        assert!(!Link::new(info).should_show(EnvironmentSet::empty()));

        assert!(directory("Games").should_show(EnvironmentSet::empty()));
    }
}
