//! Configuration types for jqa-sonar.

use crate::dispatch::RuleKeys;
use crate::emitter::EmitterSettings;
use crate::types::{RuleKey, Severity};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Minimum severity that fails the quality gate.
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Report location.
    #[serde(default)]
    pub report: ReportConfig,

    /// Host rule keys.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Default severities per rule kind.
    #[serde(default)]
    pub severity: SeverityConfig,

    /// Shared resolver settings.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Per-language resolver settings, keyed by language tag.
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageConfig>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if the resolver for a language is enabled.
    #[must_use]
    pub fn is_language_enabled(&self, language: &str) -> bool {
        self.language(language)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the settings for a language tag, ignoring case.
    #[must_use]
    pub fn language(&self, language: &str) -> Option<&LanguageConfig> {
        self.languages
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(language))
            .map(|(_, c)| c)
    }

    /// Builds the emitter settings described by this configuration.
    #[must_use]
    pub fn emitter_settings(&self) -> EmitterSettings {
        EmitterSettings {
            rule_keys: RuleKeys::new(
                RuleKey::new(&self.rules.repository, &self.rules.concept_key),
                RuleKey::new(&self.rules.repository, &self.rules.constraint_key),
            ),
            concept_severity: self.severity.concept,
            constraint_severity: self.severity.constraint,
        }
    }
}

/// Where to find the analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report path, relative to the project root.
    #[serde(default = "default_report_path")]
    pub path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
        }
    }
}

fn default_report_path() -> PathBuf {
    PathBuf::from("target/jqassistant/jqassistant-report.json")
}

/// Host rule repository and keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RulesConfig {
    /// Rule repository key.
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Rule key for concepts that could not be applied.
    #[serde(default = "default_concept_key")]
    pub concept_key: String,
    /// Rule key for constraint violations.
    #[serde(default = "default_constraint_key")]
    pub constraint_key: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            concept_key: default_concept_key(),
            constraint_key: default_constraint_key(),
        }
    }
}

fn default_repository() -> String {
    RuleKeys::REPOSITORY.to_string()
}

fn default_concept_key() -> String {
    RuleKeys::INVALID_CONCEPT.to_string()
}

fn default_constraint_key() -> String {
    RuleKeys::CONSTRAINT_VIOLATION.to_string()
}

/// Default severities for findings that do not declare one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeverityConfig {
    /// Severity of concepts that could not be applied.
    #[serde(default)]
    pub concept: Severity,
    /// Severity of constraint violations.
    #[serde(default)]
    pub constraint: Severity,
}

/// Settings shared by all resolvers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Glob patterns, anchored at the scope root, that never resolve.
    ///
    /// `*` stays within one path component; `**` spans directories.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
        }
    }
}

fn default_exclude() -> Vec<String> {
    vec!["target/**".to_string(), "build/**".to_string()]
}

/// Per-language resolver settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LanguageConfig {
    /// Whether the resolver for this language is registered.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Resolver strategy: `"jvm"` or `"file"`. Defaults by language.
    #[serde(default)]
    pub resolver: Option<String>,

    /// Source directories relative to the scope root.
    #[serde(default)]
    pub source_dirs: Vec<String>,

    /// Source file extension for JVM languages (e.g., `"java"`).
    #[serde(default)]
    pub extension: Option<String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.report.path,
            PathBuf::from("target/jqassistant/jqassistant-report.json")
        );
        assert_eq!(config.rules.repository, "jQAssistant");
        assert!(config.fail_on.is_none());
        assert!(config.is_language_enabled("java"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail-on = "critical"

[report]
path = "build/report.json"

[rules]
repository = "jqa"
constraint-key = "Violation"

[severity]
concept = "minor"

[resolver]
exclude = ["**/generated/**"]

[languages.Java]
source-dirs = ["src"]

[languages.kotlin]
enabled = false

[languages.xml]
resolver = "file"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.fail_on, Some(Severity::Critical));
        assert_eq!(config.report.path, PathBuf::from("build/report.json"));
        assert_eq!(config.rules.concept_key, "InvalidConcept");
        assert_eq!(config.severity.concept, Severity::Minor);
        assert_eq!(config.severity.constraint, Severity::Major);
        assert_eq!(config.resolver.exclude, vec!["**/generated/**"]);

        assert_eq!(
            config.language("java").map(|c| c.source_dirs.clone()),
            Some(vec!["src".to_string()])
        );
        assert!(!config.is_language_enabled("KOTLIN"));
        assert_eq!(
            config.language("xml").and_then(|c| c.resolver.as_deref()),
            Some("file")
        );

        let settings = config.emitter_settings();
        assert_eq!(
            settings
                .rule_keys
                .for_kind(crate::model::RuleKind::Constraint)
                .to_string(),
            "jqa:Violation"
        );
        assert_eq!(settings.concept_severity, Severity::Minor);
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("fail-on = \"fatal\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
