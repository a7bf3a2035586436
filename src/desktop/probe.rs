//! Executable availability checks for `TryExec`.

use crate::desktop::env::session_var;
use std::path::PathBuf;

/// Answers whether a program can be executed.
///
/// Implementations must be synchronous and free of side effects. Any failure
/// to decide counts as "not executable".
pub trait ExecProbe {
    fn can_execute(&self, program: &str) -> bool;
}

impl<F> ExecProbe for F
where
    F: Fn(&str) -> bool,
{
    fn can_execute(&self, program: &str) -> bool {
        self(program)
    }
}

/// Probe that resolves programs against a list of search directories.
///
/// Names containing a `/` are checked as paths; bare names are looked up in
/// each search directory in order.
#[derive(Debug, Clone, Default)]
pub struct PathProbe {
    search_path: Vec<PathBuf>,
}

impl PathProbe {
    /// Create a probe that searches the given directories.
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }

    /// Create a probe that searches `PATH` from the session environment.
    pub fn from_session() -> Self {
        let search_path = session_var("PATH")
            .map(|path| std::env::split_paths(path).collect())
            .unwrap_or_default();
        Self::new(search_path)
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Resolve a program to the file that would be executed.
    pub fn resolve(&self, program: &str) -> Option<PathBuf> {
        if program.is_empty() {
            return None;
        }

        let paths = if self.search_path.is_empty() {
            None
        } else {
            match std::env::join_paths(&self.search_path) {
                Ok(paths) => Some(paths),
                Err(e) => {
                    tracing::debug!(%e, "Search path cannot be joined");
                    return None;
                }
            }
        };
        let cwd = std::env::current_dir().unwrap_or_default();

        which::which_in(program, paths, cwd).ok()
    }
}

impl ExecProbe for PathProbe {
    fn can_execute(&self, program: &str) -> bool {
        let found = self.resolve(program);
        tracing::debug!(program, ?found, "TryExec probe");
        found.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    #[cfg(unix)]
    fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_closure_probe() {
        let probe = |program: &str| program == "firefox";
        assert!(probe.can_execute("firefox"));
        assert!(!probe.can_execute("chrome"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_bare_name_in_search_path() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let expected = write_file(second.path(), "tool", 0o755);

        let probe = PathProbe::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(probe.resolve("tool"), Some(expected));
        assert!(probe.can_execute("tool"));
        assert!(!probe.can_execute("missing"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "data", 0o644);

        let probe = PathProbe::new(vec![dir.path().to_path_buf()]);
        assert!(!probe.can_execute("data"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_path_ignores_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "tool", 0o700);

        let probe = PathProbe::new(Vec::new());
        assert!(probe.can_execute(path.to_str().unwrap()));
        assert!(!probe.can_execute("tool"));
    }

    #[test]
    fn test_directory_and_empty_name_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let probe = PathProbe::new(vec![dir.path().to_path_buf()]);
        assert!(!probe.can_execute(dir.path().to_str().unwrap()));
        assert!(!probe.can_execute(""));
    }
}
