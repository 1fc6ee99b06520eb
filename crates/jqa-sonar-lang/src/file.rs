//! Resolver for languages that report plain file paths (XML, YAML, ...).

use crate::paths::{self, Exclusions};
use jqa_sonar_core::{ResolveError, Resource, ResourceResolver, Scope};

use std::path::PathBuf;
use tracing::trace;

/// Resolves paths relative to the scope root or to one of its base dirs.
#[derive(Debug, Clone)]
pub struct FileResolver {
    language: String,
    base_dirs: Vec<PathBuf>,
    exclusions: Exclusions,
}

impl FileResolver {
    /// Creates a resolver that looks directly under the scope root.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            base_dirs: vec![PathBuf::new()],
            exclusions: Exclusions::default(),
        }
    }

    /// Looks under these directories instead, in order.
    ///
    /// An empty list keeps the scope root.
    #[must_use]
    pub fn with_base_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        let dirs: Vec<PathBuf> = dirs.into_iter().map(Into::into).collect();
        if !dirs.is_empty() {
            self.base_dirs = dirs;
        }
        self
    }

    /// Sets the paths that never resolve.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }
}

impl ResourceResolver for FileResolver {
    fn language(&self) -> &str {
        &self.language
    }

    fn resolve(
        &self,
        scope: &Scope,
        symbolic_path: &str,
        _element: &str,
    ) -> Result<Option<Resource>, ResolveError> {
        let candidate = paths::contained_relative(symbolic_path)?;
        for base in &self.base_dirs {
            let relative = base.join(&candidate);
            if self.exclusions.is_excluded(&relative) {
                trace!("{} is excluded", relative.display());
                continue;
            }
            if paths::is_file(&scope.root().join(&relative))? {
                return Ok(Some(Resource::new(self.language.as_str(), relative)));
            }
        }
        Ok(None)
    }
}
