//! Database path resolution
//!
//! Every endpoint locates its database the same way: an optional override
//! (usually from the environment) wins, otherwise a default path relative to
//! the working directory is used. Relative inputs are resolved against the
//! working directory; absolute overrides are taken verbatim.

use std::path::{Component, Path, PathBuf};

/// Where a database lives by default and which variable overrides it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseLocation {
    /// Environment variable holding an absolute or relative override
    pub env_var: &'static str,
    /// Default path, relative to the working directory
    pub default_relative: &'static str,
}

/// Event database (`risk_events` table)
pub const EVENTS_DATABASE: DatabaseLocation = DatabaseLocation {
    env_var: "DATABASE_PATH",
    default_relative: "../databases/insider_risk.db",
};

/// Analytics database (`analytics_summary` table)
pub const ANALYTICS_DATABASE: DatabaseLocation = DatabaseLocation {
    env_var: "ANALYTICS_DATABASE_PATH",
    default_relative: "../databases/analytics.db",
};

impl DatabaseLocation {
    /// Resolve using the given override lookup and working directory
    pub fn resolve_with<F>(&self, lookup: F, cwd: &Path) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        let override_path = lookup(self.env_var);
        resolve_database_path(
            override_path.as_deref(),
            Path::new(self.default_relative),
            cwd,
        )
    }
}

/// Resolve a database path to an absolute path.
///
/// An empty override counts as absent.
pub fn resolve_database_path(
    override_path: Option<&str>,
    default_relative: &Path,
    cwd: &Path,
) -> PathBuf {
    match override_path.filter(|p| !p.is_empty()).map(Path::new) {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => normalize(&cwd.join(path)),
        None => normalize(&cwd.join(default_relative)),
    }
}

/// Lexically collapse `.` and `..` components, without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // never pop past the root
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
