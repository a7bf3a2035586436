//! Typed representation of a tokenized desktop file.
//!
//! A [`ParsedEntry`] is what the tokenizer hands over: groups of keys, each
//! holding an already-decoded [`Value`]. The link builder reads it mutably so
//! it can move strings out instead of copying them.

use crate::desktop::env::EnvironmentSet;
use crate::link::LinkType;
use std::collections::HashMap;

/// Name of the group every desktop file must carry.
pub const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

/// A decoded value from a desktop file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Boolean(bool),
    Type(LinkType),
    Environments(EnvironmentSet),
}

impl Value {
    /// Short name of the value's kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Type(_) => "type",
            Value::Environments(_) => "environments",
        }
    }
}

/// The keys of one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGroup {
    keys: HashMap<String, Value>,
}

impl ParsedGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.keys.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keys.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Borrow a string value. Values of another kind read as absent.
    pub fn string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            other => {
                mismatch(key, "string", other);
                None
            }
        }
    }

    /// Read a boolean value. Values of another kind read as absent.
    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Boolean(b) => Some(*b),
            other => {
                mismatch(key, "boolean", other);
                None
            }
        }
    }

    /// Read an environment set. Values of another kind read as absent.
    pub fn environments(&self, key: &str) -> Option<EnvironmentSet> {
        match self.get(key)? {
            Value::Environments(set) => Some(*set),
            other => {
                mismatch(key, "environments", other);
                None
            }
        }
    }

    /// Move a string value out, leaving an empty string in its slot.
    pub fn take_string(&mut self, key: &str) -> Option<String> {
        match self.keys.get_mut(key)? {
            Value::String(s) => Some(std::mem::take(s)),
            other => {
                mismatch(key, "string", other);
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn mismatch(key: &str, expected: &str, found: &Value) {
    tracing::debug!(key, expected, found = found.kind(), "Ignoring value of wrong kind");
}

/// A tokenized desktop file: group name to group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEntry {
    groups: HashMap<String, ParsedGroup>,
}

impl ParsedEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group, replacing any previous group with the same name.
    pub fn insert_group(&mut self, name: impl Into<String>, group: ParsedGroup) {
        self.groups.insert(name.into(), group);
    }

    pub fn group(&self, name: &str) -> Option<&ParsedGroup> {
        self.groups.get(name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut ParsedGroup> {
        self.groups.get_mut(name)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// The `[Desktop Entry]` group, if present.
    pub fn desktop_entry(&self) -> Option<&ParsedGroup> {
        self.group(DESKTOP_ENTRY_GROUP)
    }

    pub fn desktop_entry_mut(&mut self) -> Option<&mut ParsedGroup> {
        self.group_mut(DESKTOP_ENTRY_GROUP)
    }
}
