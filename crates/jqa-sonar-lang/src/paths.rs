//! Path helpers shared by the resolvers.

use jqa_sonar_core::ResolveError;
use std::path::{Component, Path, PathBuf};

const MATCH_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Glob patterns for paths that never resolve.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    patterns: Vec<glob::Pattern>,
}

impl Exclusions {
    /// Compiles exclusion patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern has invalid glob syntax.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, glob::PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Checks a path relative to the scope root.
    ///
    /// Patterns are anchored at the scope root and `*` never crosses a `/`.
    #[must_use]
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let path = relative.to_string_lossy().replace('\\', "/");
        self.patterns
            .iter()
            .any(|p| p.matches_with(&path, MATCH_OPTIONS))
    }
}

/// Converts a symbolic path into a relative path that stays inside the root.
///
/// A leading `/` is treated as the root itself. `..` components are rejected.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidPath`] for empty or escaping paths.
pub fn contained_relative(symbolic: &str) -> Result<PathBuf, ResolveError> {
    let trimmed = symbolic.trim().trim_start_matches(['/', '\\']);
    if trimmed.is_empty() {
        return Err(invalid(symbolic, "empty path"));
    }

    let mut relative = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid(symbolic, "escapes the scope root")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid(symbolic, "absolute path"));
            }
        }
    }
    if relative.as_os_str().is_empty() {
        return Err(invalid(symbolic, "empty path"));
    }
    Ok(relative)
}

/// Returns true if `path` is an existing regular file.
///
/// # Errors
///
/// Returns an error for IO failures other than "not found".
pub fn is_file(path: &Path) -> Result<bool, ResolveError> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ResolveError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn invalid(path: &str, reason: &str) -> ResolveError {
    ResolveError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
