pub mod entry;
pub mod env;
pub mod parser;
pub mod probe;

pub use entry::{DESKTOP_ENTRY_GROUP, ParsedEntry, ParsedGroup, Value};
pub use env::{Environment, EnvironmentSet, capture_session_environment, current_desktop};
pub use parser::{load_link, parse_desktop_file, parse_desktop_str};
pub use probe::{ExecProbe, PathProbe};
