//! Locates the configuration file.
//!
//! Lookup order:
//!
//! 1. `--config <FILE>`
//! 2. `jqa-sonar.toml`, then `.jqa-sonar.toml`, in the project root
//! 3. `config.toml` in the global directory (`$JQA_SONAR_CONFIG_DIR` or `~/.jqa-sonar`)
//! 4. built-in defaults

use anyhow::Context;
use jqa_sonar_core::Config;
use std::path::{Path, PathBuf};

const PROJECT_FILES: &[&str] = &["jqa-sonar.toml", ".jqa-sonar.toml"];
const GLOBAL_FILE: &str = "config.toml";
const GLOBAL_DIR_ENV: &str = "JQA_SONAR_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; not checked for existence.
    Explicit(PathBuf),
    /// Found in the project root.
    Project(PathBuf),
    /// Found in the global directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The configuration file, unless defaults apply.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration, or defaults when no file was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> anyhow::Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No configuration file, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Resolves the configuration for a project.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    Locator {
        global_dir: global_config_dir(),
    }
    .locate(project_dir, explicit)
}

/// The global configuration directory, if a home directory is known.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(GLOBAL_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home::home_dir().map(|home| home.join(".jqa-sonar")),
    }
}

/// Lookup with an injectable global directory, so tests never read the environment.
struct Locator {
    global_dir: Option<PathBuf>,
}

impl Locator {
    fn locate(&self, project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        if let Some(found) = PROJECT_FILES
            .iter()
            .map(|name| project_dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            tracing::debug!("Found project config: {}", found.display());
            return ConfigSource::Project(found);
        }

        if let Some(found) = self
            .global_dir
            .as_ref()
            .map(|dir| dir.join(GLOBAL_FILE))
            .filter(|candidate| candidate.is_file())
        {
            tracing::debug!("Found global config: {}", found.display());
            return ConfigSource::Global(found);
        }

        ConfigSource::Default
    }
}
