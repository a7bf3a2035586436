//! Validated descriptors for freedesktop desktop entries.
//!
//! [`desktop`] turns desktop files into typed [`ParsedEntry`] values and
//! provides the environment and `TryExec` checks; [`link`] validates a parsed
//! entry and produces a shared, immutable [`Link`].

pub mod cli;
pub mod config;
pub mod desktop;
pub mod error;
pub mod link;

#[cfg(test)]
pub mod test_utils;

pub use desktop::{ExecProbe, ParsedEntry};
pub use error::{BuildError, LoadError};
pub use link::{Link, LinkType, build};
