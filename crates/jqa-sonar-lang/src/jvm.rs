//! Resolver for JVM languages whose analyzed artifacts are class files.
//!
//! The analyzer reports types by the class file they were scanned from
//! (`/com/acme/Bar.class`), sometimes by fully-qualified name
//! (`com.acme.Bar$Inner`). Both are mapped back to the declaring source
//! file under one of the configured source directories.

use crate::paths::{self, Exclusions};
use jqa_sonar_core::{ResolveError, Resource, ResourceResolver, Scope};

use std::path::PathBuf;
use tracing::trace;

/// Element descriptor the analyzer uses for packages.
const PACKAGE_ELEMENT: &str = "Package";

/// Maps class files and qualified type names to source files.
#[derive(Debug, Clone)]
pub struct JvmResolver {
    language: String,
    extension: String,
    source_dirs: Vec<PathBuf>,
    exclusions: Exclusions,
}

impl JvmResolver {
    /// Creates a resolver for `language` with the given source extension
    /// and source directories (relative to the scope root).
    #[must_use]
    pub fn new(
        language: impl Into<String>,
        extension: impl Into<String>,
        source_dirs: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        Self {
            language: language.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
            source_dirs: source_dirs.into_iter().map(Into::into).collect(),
            exclusions: Exclusions::default(),
        }
    }

    /// Maven/Gradle layout for Java.
    #[must_use]
    pub fn java() -> Self {
        Self::new("java", "java", ["src/main/java", "src/test/java"])
    }

    /// Maven/Gradle layout for Kotlin.
    #[must_use]
    pub fn kotlin() -> Self {
        Self::new("kotlin", "kt", ["src/main/kotlin", "src/test/kotlin"])
    }

    /// Sets the paths that never resolve.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Source directories searched, in order.
    #[must_use]
    pub fn source_dirs(&self) -> &[PathBuf] {
        &self.source_dirs
    }

    /// Source file paths (relative to a source directory) that may declare
    /// the referenced element, most likely first.
    fn candidates(&self, symbolic_path: &str, element: &str) -> Result<Vec<PathBuf>, ResolveError> {
        let trimmed = symbolic_path.trim();
        let source_suffix = format!(".{}", self.extension);

        // Qualified type names carry no separators; class files and sources do.
        let path = if !trimmed.contains(['/', '\\'])
            && !trimmed.ends_with(".class")
            && !trimmed.ends_with(&source_suffix)
        {
            trimmed.replace('.', "/")
        } else {
            trimmed.to_string()
        };
        let relative = paths::contained_relative(&path)?;

        if element.eq_ignore_ascii_case(PACKAGE_ELEMENT) {
            return Ok(vec![relative.join(format!("package-info.{}", self.extension))]);
        }
        if relative.extension().is_some_and(|ext| ext == self.extension.as_str()) {
            return Ok(vec![relative]);
        }

        let Some(file_name) = relative.file_name().and_then(|n| n.to_str()) else {
            return Ok(Vec::new());
        };
        let class_name = file_name.strip_suffix(".class").unwrap_or(file_name);
        let outer = class_name.split('$').next().unwrap_or(class_name);
        if outer.is_empty() {
            return Ok(Vec::new());
        }

        let mut names = vec![outer.to_string()];
        // Top-level Kotlin functions compile into `<File>Kt` facades.
        if let Some(facade) = outer.strip_suffix("Kt").filter(|s| !s.is_empty()) {
            names.push(facade.to_string());
        }

        Ok(names
            .into_iter()
            .map(|name| relative.with_file_name(format!("{name}.{}", self.extension)))
            .collect())
    }
}

impl ResourceResolver for JvmResolver {
    fn language(&self) -> &str {
        &self.language
    }

    fn resolve(
        &self,
        scope: &Scope,
        symbolic_path: &str,
        element: &str,
    ) -> Result<Option<Resource>, ResolveError> {
        let candidates = self.candidates(symbolic_path, element)?;
        for dir in &self.source_dirs {
            for candidate in &candidates {
                let relative = dir.join(candidate);
                if self.exclusions.is_excluded(&relative) {
                    trace!("{} is excluded", relative.display());
                    continue;
                }
                if paths::is_file(&scope.root().join(&relative))? {
                    return Ok(Some(Resource::new(self.language.as_str(), relative)));
                }
            }
        }
        Ok(None)
    }
}
