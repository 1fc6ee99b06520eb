//! Builds the resolver registry from configuration.

use crate::file::FileResolver;
use crate::jvm::JvmResolver;
use crate::paths::Exclusions;
use jqa_sonar_core::{Config, LanguageConfig, ResolverBox, ResolverRegistry};

use std::collections::BTreeMap;
use tracing::debug;

/// Languages registered without any configuration.
pub const BUILTIN_LANGUAGES: &[&str] = &["file", "java", "kotlin"];

/// Resolver strategies selectable per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Class files and qualified names mapped into source directories.
    Jvm,
    /// Plain relative file paths.
    File,
}

impl Strategy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jvm" => Some(Self::Jvm),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    fn default_for(language: &str) -> Self {
        match language {
            "java" | "kotlin" => Self::Jvm,
            _ => Self::File,
        }
    }
}

/// Errors building the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A `resolver.exclude` pattern is not a valid glob.
    #[error("invalid exclude pattern: {0}")]
    Exclude(#[from] glob::PatternError),

    /// A language names an unknown resolver strategy.
    #[error("unknown resolver `{value}` for language '{language}', expected: jvm, file")]
    UnknownStrategy {
        /// The language tag.
        language: String,
        /// The invalid strategy name.
        value: String,
    },
}

/// Builds a registry with the built-in resolvers and every configured language.
///
/// Languages with `enabled = false` are left out, so their references
/// never resolve.
///
/// # Errors
///
/// Returns an error on an invalid exclude pattern or resolver name.
pub fn registry_from_config(config: &Config) -> Result<ResolverRegistry, RegistryError> {
    let exclusions = Exclusions::new(&config.resolver.exclude)?;

    let mut settings: BTreeMap<String, Option<&LanguageConfig>> = BUILTIN_LANGUAGES
        .iter()
        .map(|tag| ((*tag).to_string(), None))
        .collect();
    for (tag, language) in &config.languages {
        settings.insert(tag.to_lowercase(), Some(language));
    }

    let mut registry = ResolverRegistry::new();
    for (tag, language) in settings {
        if !config.is_language_enabled(&tag) {
            debug!("Resolver for '{tag}' disabled by configuration");
            continue;
        }
        registry.register(build(&tag, language, &exclusions)?);
    }
    debug!("Registered resolvers: {}", registry.languages().join(", "));
    Ok(registry)
}

fn build(
    tag: &str,
    language: Option<&LanguageConfig>,
    exclusions: &Exclusions,
) -> Result<ResolverBox, RegistryError> {
    let strategy = match language.and_then(|l| l.resolver.as_deref()) {
        Some(value) => Strategy::parse(value).ok_or_else(|| RegistryError::UnknownStrategy {
            language: tag.to_string(),
            value: value.to_string(),
        })?,
        None => Strategy::default_for(tag),
    };
    let source_dirs = language.map(|l| l.source_dirs.clone()).unwrap_or_default();

    let resolver: ResolverBox = match strategy {
        Strategy::Jvm => {
            let defaults = match tag {
                "java" => JvmResolver::java(),
                "kotlin" => JvmResolver::kotlin(),
                _ => JvmResolver::new(tag, tag, [format!("src/main/{tag}"), format!("src/test/{tag}")]),
            };
            let extension = language
                .and_then(|l| l.extension.clone())
                .unwrap_or_else(|| default_extension(tag));
            let dirs = if source_dirs.is_empty() {
                defaults.source_dirs().to_vec()
            } else {
                source_dirs.into_iter().map(Into::into).collect()
            };
            Box::new(JvmResolver::new(tag, extension, dirs).with_exclusions(exclusions.clone()))
        }
        Strategy::File => Box::new(
            FileResolver::new(tag)
                .with_base_dirs(source_dirs)
                .with_exclusions(exclusions.clone()),
        ),
    };
    Ok(resolver)
}

fn default_extension(tag: &str) -> String {
    match tag {
        "kotlin" => "kt".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_without_config() {
        let registry = registry_from_config(&Config::default()).unwrap();
        assert_eq!(registry.languages(), vec!["file", "java", "kotlin"]);
    }

    #[test]
    fn configured_languages_are_added_and_disabled() {
        let config = Config::parse(
            r#"
[languages.XML]
[languages.kotlin]
enabled = false
"#,
        )
        .unwrap();
        let registry = registry_from_config(&config).unwrap();
        assert_eq!(registry.languages(), vec!["file", "java", "xml"]);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let config = Config::parse("[languages.xml]\nresolver = \"magic\"\n").unwrap();
        let err = registry_from_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown resolver `magic` for language 'xml', expected: jvm, file"
        );
    }

    #[test]
    fn invalid_exclude_is_rejected() {
        let config = Config::parse("[resolver]\nexclude = [\"[\"]\n").unwrap();
        assert!(matches!(
            registry_from_config(&config),
            Err(RegistryError::Exclude(_))
        ));
    }
}
