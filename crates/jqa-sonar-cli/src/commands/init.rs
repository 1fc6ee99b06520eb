//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "jqa-sonar.toml";

const DEFAULT_CONFIG: &str = r#"# jqa-sonar configuration

# Fail (exit status 1) when an issue has at least this severity.
# fail-on = "critical"

[report]
# Analysis report, relative to the project root
path = "target/jqassistant/jqassistant-report.json"

[rules]
repository = "jQAssistant"
concept-key = "InvalidConcept"
constraint-key = "ConstraintViolation"

# Severity for findings that do not declare one
[severity]
concept = "major"
constraint = "major"

[resolver]
# Paths that never receive issues, anchored at each scope root.
# `*` stays within one directory, `**` spans directories.
exclude = [
    "target/**",
    "build/**",
]

[languages.java]
source-dirs = ["src/main/java", "src/test/java"]

[languages.kotlin]
source-dirs = ["src/main/kotlin", "src/test/kotlin"]
extension = "kt"

# Languages reporting plain file paths
# [languages.xml]
# resolver = "file"
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("."), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to match your source layout");
    println!("  2. Run: jqa-sonar issues --module <module-dir>");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
