//! Resolver trait and the language-keyed registry.

use crate::model::SourceRef;
use crate::scope::Scope;
use crate::types::{LineRange, ResolvedLocation, Resource};

use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Maps symbolic source references of one language to resources in scope.
///
/// Implementations must be pure lookups: calling `resolve` twice with the
/// same arguments yields the same outcome, and nothing is mutated.
///
/// # Example
///
/// ```ignore
/// use jqa_sonar_core::{ResourceResolver, ResolveError, Resource, Scope};
///
/// struct ScriptResolver;
///
/// impl ResourceResolver for ScriptResolver {
///     fn language(&self) -> &str { "groovy" }
///
///     fn resolve(&self, scope: &Scope, path: &str, _element: &str)
///         -> Result<Option<Resource>, ResolveError>
///     {
///         let candidate = scope.root().join("scripts").join(path);
///         Ok(candidate.is_file().then(|| Resource::new("groovy", path)))
///     }
/// }
/// ```
pub trait ResourceResolver: Send + Sync {
    /// Language tag this resolver handles (matched case-insensitively).
    fn language(&self) -> &str;

    /// Resolves a symbolic path to a resource under `scope.root()`.
    ///
    /// Returns `Ok(None)` when the resource does not belong to the scope.
    ///
    /// # Errors
    ///
    /// Returns an error on an unexpected failure. The registry treats it
    /// as "not resolved" for the current row only.
    fn resolve(
        &self,
        scope: &Scope,
        symbolic_path: &str,
        element: &str,
    ) -> Result<Option<Resource>, ResolveError>;

    /// Converts a 1-based line into a range inside `resource`.
    ///
    /// Line 0 carries no position and yields `None` (whole resource).
    fn to_range(&self, _resource: &Resource, line: usize) -> Option<LineRange> {
        (line > 0).then(|| LineRange::at_line(line))
    }
}

/// Type alias for boxed resolver trait objects.
pub type ResolverBox = Box<dyn ResourceResolver>;

/// Unexpected resolver failures.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Filesystem access failed.
    #[error("IO error resolving {path}: {source}")]
    Io {
        /// Path being checked.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The symbolic path cannot be interpreted.
    #[error("invalid symbolic path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Outcome of resolving one source reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The reference points into the current scope.
    Resolved(ResolvedLocation),
    /// Unknown language, resource outside the scope, or a resolver fault.
    NotResolved,
}

impl Resolution {
    /// Converts into an `Option`.
    #[must_use]
    pub fn into_location(self) -> Option<ResolvedLocation> {
        match self {
            Self::Resolved(location) => Some(location),
            Self::NotResolved => None,
        }
    }
}

/// Language tag to resolver dispatch table.
///
/// Read-only once built, so a single registry can serve concurrent runs
/// over different scopes.
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: BTreeMap<String, ResolverBox>,
}

impl ResolverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resolver under its lower-cased language tag.
    ///
    /// A later registration for the same tag replaces the earlier one.
    #[must_use]
    pub fn with<R: ResourceResolver + 'static>(mut self, resolver: R) -> Self {
        self.register(Box::new(resolver));
        self
    }

    /// Registers a boxed resolver under its lower-cased language tag.
    pub fn register(&mut self, resolver: ResolverBox) {
        let key = resolver.language().to_lowercase();
        if self.resolvers.insert(key.clone(), resolver).is_some() {
            debug!("Replacing resolver for language '{key}'");
        }
    }

    /// Returns the registered language tags in sorted order.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        self.resolvers.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered resolvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Returns true if no resolver is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Looks up the resolver for a language tag, ignoring case.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&dyn ResourceResolver> {
        self.resolvers
            .get(&language.to_lowercase())
            .map(|resolver| &**resolver)
    }

    /// Resolves a source reference against the given scope.
    ///
    /// Never fails: a missing resolver, an out-of-scope resource and a
    /// resolver fault all yield [`Resolution::NotResolved`].
    #[must_use]
    pub fn resolve(&self, scope: &Scope, source: &SourceRef) -> Resolution {
        let Some(resolver) = self.get(&source.language) else {
            debug!(
                "No resolver for language '{}', leaving {} unresolved",
                source.language, source.symbolic_path
            );
            return Resolution::NotResolved;
        };

        match resolver.resolve(scope, &source.symbolic_path, &source.element) {
            Ok(Some(resource)) => {
                let range = resolver.to_range(&resource, source.line);
                Resolution::Resolved(ResolvedLocation::new(resource, range))
            }
            Ok(None) => {
                debug!(
                    "{} not found under {}",
                    source.symbolic_path,
                    scope.root().display()
                );
                Resolution::NotResolved
            }
            Err(e) => {
                warn!(
                    "Resolver for '{}' failed on {}: {e}",
                    source.language, source.symbolic_path
                );
                Resolution::NotResolved
            }
        }
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}
