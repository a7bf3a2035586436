use super::{AppData, Link, LinkData, LinkInfo, LinkType, StartupNotify, UrlData};
use crate::desktop::entry::{ParsedEntry, ParsedGroup, Value};
use crate::desktop::probe::ExecProbe;
use crate::error::BuildError;
use tracing::debug;

/// Build a [`Link`] from the `[Desktop Entry]` group of a parsed entry.
///
/// Strings stored in the link are moved out of `entry`, leaving empty
/// strings behind. Nothing is moved until every required key has been
/// found, so a failed build leaves `entry` untouched.
///
/// For applications with a `TryExec` key, `probe` decides whether the
/// program is available; an unavailable program hides the link but does
/// not fail the build.
pub fn build(entry: &mut ParsedEntry, probe: &impl ExecProbe) -> Result<Link, BuildError> {
    let group = entry.desktop_entry_mut().ok_or(BuildError::MissingGroup)?;

    let link_type = link_type(group)?;
    if group.string("Name").is_none() {
        return Err(BuildError::MissingRequiredField("Name"));
    }
    let target_key = match link_type {
        LinkType::Application => Some("Exec"),
        LinkType::Url => Some("URL"),
        LinkType::Directory => None,
    };
    if let Some(key) = target_key
        && group.string(key).is_none()
    {
        return Err(BuildError::MissingRequiredField(key));
    }

    // Validation is done; from here on strings are relocated.
    let name = group.take_string("Name").unwrap_or_default();
    let target = target_key
        .and_then(|key| group.take_string(key))
        .unwrap_or_default();

    let data = match link_type {
        LinkType::Application => LinkData::Application(app_data(group, target)),
        LinkType::Url => LinkData::Url(UrlData { address: target }),
        LinkType::Directory => LinkData::Directory,
    };

    let mut info = LinkInfo::new(name, data);

    if let Some(hidden) = group.boolean("Hidden") {
        info.deleted = hidden;
    }
    if let Some(no_display) = group.boolean("NoDisplay") {
        info.visible = !no_display;
    }

    info.generic_name = group.take_string("GenericName");
    info.comment = group.take_string("Comment");
    info.icon = group.take_string("Icon");

    info.env_required = group.environments("OnlyShowIn").unwrap_or_default();
    info.env_restricted = group.environments("NotShowIn").unwrap_or_default();

    if link_type == LinkType::Application
        && let Some(program) = group.string("TryExec")
    {
        let available = probe.can_execute(program);
        if !available {
            debug!(name = %info.name, program, "TryExec program not available, hiding entry");
        }
        info.visible = info.visible && available;
    }

    debug!(name = %info.name, kind = %link_type, visible = info.visible, "Built link");
    Ok(Link::new(info))
}

fn link_type(group: &ParsedGroup) -> Result<LinkType, BuildError> {
    match group.get("Type") {
        Some(Value::Type(link_type)) => Ok(*link_type),
        Some(Value::String(literal)) => LinkType::from_literal(literal)
            .ok_or_else(|| BuildError::UnrecognizedType(literal.clone())),
        Some(other) => {
            debug!(found = other.kind(), "Type key holds a value of the wrong kind");
            Err(BuildError::MissingRequiredField("Type"))
        }
        None => Err(BuildError::MissingRequiredField("Type")),
    }
}

fn app_data(group: &mut ParsedGroup, exec: String) -> AppData {
    let mut app = AppData::new(exec);

    app.working_dir = group.take_string("Path");
    if let Some(terminal) = group.boolean("Terminal") {
        app.terminal = terminal;
    }
    app.startup = match group.boolean("StartupNotify") {
        Some(true) => StartupNotify::ProtocolSupport,
        Some(false) => StartupNotify::NoSupport,
        None => StartupNotify::LegacySupport,
    };

    app
}
