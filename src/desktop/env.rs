//! Desktop environments and the session environment.
//!
//! Entries restrict where they are shown with `OnlyShowIn` and `NotShowIn`.
//! Both keys name environments from a closed list, so they are stored as
//! bit sets over [`Environment`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[cfg(unix)]
use std::process::Command;

static SESSION_ENV: OnceLock<HashMap<String, String>> = OnceLock::new();

/// A registered desktop environment name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Openbox,
    Gnome,
    Kde,
    Lxde,
    Lxqt,
    Mate,
    Razor,
    Rox,
    Tde,
    Unity,
    Xfce,
    Ede,
    Cinnamon,
    Pantheon,
    Budgie,
    Enlightenment,
    Deepin,
    Endless,
    Old,
}

impl Environment {
    /// Every known environment, in declaration order.
    pub const ALL: [Environment; 19] = [
        Environment::Openbox,
        Environment::Gnome,
        Environment::Kde,
        Environment::Lxde,
        Environment::Lxqt,
        Environment::Mate,
        Environment::Razor,
        Environment::Rox,
        Environment::Tde,
        Environment::Unity,
        Environment::Xfce,
        Environment::Ede,
        Environment::Cinnamon,
        Environment::Pantheon,
        Environment::Budgie,
        Environment::Enlightenment,
        Environment::Deepin,
        Environment::Endless,
        Environment::Old,
    ];

    /// Look up an environment by the name used in desktop files.
    ///
    /// Names are matched case-sensitively, as the format requires.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|env| env.name() == name)
    }

    /// The name used for this environment in desktop files.
    pub fn name(self) -> &'static str {
        match self {
            Environment::Openbox => "Openbox",
            Environment::Gnome => "GNOME",
            Environment::Kde => "KDE",
            Environment::Lxde => "LXDE",
            Environment::Lxqt => "LXQt",
            Environment::Mate => "MATE",
            Environment::Razor => "Razor",
            Environment::Rox => "ROX",
            Environment::Tde => "TDE",
            Environment::Unity => "Unity",
            Environment::Xfce => "XFCE",
            Environment::Ede => "EDE",
            Environment::Cinnamon => "Cinnamon",
            Environment::Pantheon => "Pantheon",
            Environment::Budgie => "Budgie",
            Environment::Enlightenment => "Enlightenment",
            Environment::Deepin => "DDE",
            Environment::Endless => "Endless",
            Environment::Old => "Old",
        }
    }

    fn flag(self) -> EnvironmentSet {
        match self {
            Environment::Openbox => EnvironmentSet::OPENBOX,
            Environment::Gnome => EnvironmentSet::GNOME,
            Environment::Kde => EnvironmentSet::KDE,
            Environment::Lxde => EnvironmentSet::LXDE,
            Environment::Lxqt => EnvironmentSet::LXQT,
            Environment::Mate => EnvironmentSet::MATE,
            Environment::Razor => EnvironmentSet::RAZOR,
            Environment::Rox => EnvironmentSet::ROX,
            Environment::Tde => EnvironmentSet::TDE,
            Environment::Unity => EnvironmentSet::UNITY,
            Environment::Xfce => EnvironmentSet::XFCE,
            Environment::Ede => EnvironmentSet::EDE,
            Environment::Cinnamon => EnvironmentSet::CINNAMON,
            Environment::Pantheon => EnvironmentSet::PANTHEON,
            Environment::Budgie => EnvironmentSet::BUDGIE,
            Environment::Enlightenment => EnvironmentSet::ENLIGHTENMENT,
            Environment::Deepin => EnvironmentSet::DEEPIN,
            Environment::Endless => EnvironmentSet::ENDLESS,
            Environment::Old => EnvironmentSet::OLD,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of desktop environments.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct EnvironmentSet: u32 {
        const OPENBOX       = 1 << 0;
        const GNOME         = 1 << 1;
        const KDE           = 1 << 2;
        const LXDE          = 1 << 3;
        const LXQT          = 1 << 4;
        const MATE          = 1 << 5;
        const RAZOR         = 1 << 6;
        const ROX           = 1 << 7;
        const TDE           = 1 << 8;
        const UNITY         = 1 << 9;
        const XFCE          = 1 << 10;
        const EDE           = 1 << 11;
        const CINNAMON      = 1 << 12;
        const PANTHEON      = 1 << 13;
        const BUDGIE        = 1 << 14;
        const ENLIGHTENMENT = 1 << 15;
        const DEEPIN        = 1 << 16;
        const ENDLESS       = 1 << 17;
        const OLD           = 1 << 18;
    }
}

impl EnvironmentSet {
    /// Parse a `;`-separated list such as `GNOME;KDE;`.
    ///
    /// Unknown names are skipped.
    pub fn from_desktop_list(list: &str) -> Self {
        Self::from_names(list.split(';'))
    }

    /// Collect known environment names into a set, skipping unknown ones.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::empty();
        for name in names.into_iter().map(str::trim).filter(|n| !n.is_empty()) {
            match Environment::from_name(name) {
                Some(env) => set |= env.flag(),
                None => tracing::debug!(name, "Ignoring unknown desktop environment"),
            }
        }
        set
    }

    /// Whether `env` is a member of this set.
    pub fn has(self, env: Environment) -> bool {
        self.contains(env.flag())
    }

    /// The environments in this set, in declaration order.
    pub fn environments(self) -> Vec<Environment> {
        Environment::ALL
            .into_iter()
            .filter(|env| self.has(*env))
            .collect()
    }
}

impl From<Environment> for EnvironmentSet {
    fn from(env: Environment) -> Self {
        env.flag()
    }
}

/// Session variables consulted when evaluating entries.
const SESSION_KEYS: [&str; 2] = ["PATH", "XDG_CURRENT_DESKTOP"];

/// Capture the session variables used for `TryExec` and `OnlyShowIn`.
///
/// The process environment wins; variables it lacks are taken from the
/// systemd user session, which knows `XDG_CURRENT_DESKTOP` even when we
/// were started outside the graphical session.
pub fn capture_session_environment() {
    SESSION_ENV.get_or_init(|| {
        let mut vars = process_vars();
        if vars.len() < SESSION_KEYS.len() {
            #[cfg(unix)]
            if let Some(systemd) = systemd_user_environment() {
                for key in SESSION_KEYS {
                    if let Some(value) = systemd.get(key) {
                        vars.entry(key.to_string()).or_insert_with(|| value.clone());
                    }
                }
            }
        }
        tracing::debug!(?vars, "Captured session environment");
        vars
    });
}

/// Look up a captured session variable.
///
/// Without a prior [`capture_session_environment`] call only the process
/// environment is consulted.
pub fn session_var(key: &str) -> Option<&'static str> {
    SESSION_ENV
        .get_or_init(process_vars)
        .get(key)
        .map(String::as_str)
}

fn process_vars() -> HashMap<String, String> {
    SESSION_KEYS
        .into_iter()
        .filter_map(|key| Some((key.to_string(), std::env::var(key).ok()?)))
        .collect()
}

/// The environments named by `XDG_CURRENT_DESKTOP` in the session.
pub fn current_desktop() -> EnvironmentSet {
    session_var("XDG_CURRENT_DESKTOP")
        .map(parse_current_desktop)
        .unwrap_or_default()
}

/// Parse a `XDG_CURRENT_DESKTOP` value, which is `:`-separated.
pub fn parse_current_desktop(value: &str) -> EnvironmentSet {
    EnvironmentSet::from_names(value.split(':'))
}

#[cfg(unix)]
fn systemd_user_environment() -> Option<HashMap<String, String>> {
    let output = Command::new("systemctl")
        .args(["--user", "show-environment"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    Some(parse_show_environment(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse `KEY=value` lines as printed by `systemctl show-environment`.
///
/// Values may be wrapped in single or double quotes.
fn parse_show_environment(output: &str) -> HashMap<String, String> {
    output
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim_matches('"').trim_matches('\'');
            (key.to_string(), value.to_string())
        })
        .collect()
}
