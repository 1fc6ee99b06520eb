//! Analysis scope passed explicitly to every run.

use std::path::{Component, Path, PathBuf};

/// The part of the project a run reports on.
///
/// A multi-module build runs once per module; every run shares the same
/// `project_root` and gets its own `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    root: PathBuf,
    project_root: PathBuf,
}

impl Scope {
    /// Creates a scope for `root` inside the project rooted at `project_root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            project_root: project_root.into(),
        }
    }

    /// Creates the scope covering the whole project.
    #[must_use]
    pub fn project(project_root: impl Into<PathBuf>) -> Self {
        let root = project_root.into();
        Self {
            project_root: root.clone(),
            root,
        }
    }

    /// Returns the root directory of this scope.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the top-level project root.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns true if this scope is the project root itself.
    ///
    /// Paths are compared lexically after normalization; when both exist
    /// on disk their canonical forms are compared as well.
    #[must_use]
    pub fn is_project_root(&self) -> bool {
        if normalize(&self.root) == normalize(&self.project_root) {
            return true;
        }
        match (self.root.canonicalize(), self.project_root.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Lexically normalizes a path: drops `.` components and resolves `..`
/// against preceding normal components.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
