//! Issues command implementation.

use anyhow::{anyhow, bail, Context, Result};
use jqa_sonar_core::report::load_report;
use jqa_sonar_core::{Config, IssueEmitter, IssueReport, Scope, Severity};
use jqa_sonar_lang::registry_from_config;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of the issues command.
#[derive(Debug)]
pub struct IssuesArgs {
    /// Project root.
    pub path: PathBuf,
    /// Report file overriding `report.path`.
    pub report: Option<PathBuf>,
    /// Module directories, each processed as its own scope.
    pub modules: Vec<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Quality gate overriding `fail-on`.
    pub fail_on: Option<Severity>,
}

/// Runs the issues command.
pub fn run(args: &IssuesArgs, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let report = collect(&config, &args.path, args.report.as_deref(), &args.modules)?;

    super::output::print(&report, args.format)?;

    if let Some(threshold) = args.fail_on.or(config.fail_on) {
        if report.has_issues_at(threshold) {
            tracing::debug!("Issues at or above {threshold} found, failing");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Loads the report and emits issues for the project root, then each module.
pub fn collect(
    config: &Config,
    project_root: &Path,
    report_override: Option<&Path>,
    modules: &[PathBuf],
) -> Result<IssueReport> {
    let report_path = report_override.map_or_else(
        || project_root.join(&config.report.path),
        Path::to_path_buf,
    );
    // Rendered through miette to keep the diagnostic code and help text.
    let findings =
        load_report(&report_path).map_err(|e| anyhow!("{:?}", miette::Report::new(e)))?;

    let registry = registry_from_config(config).context("Failed to set up resolvers")?;
    let settings = config.emitter_settings();

    let mut scopes = vec![Scope::project(project_root)];
    for module in modules {
        if !module.is_dir() {
            bail!("Module directory not found: {}", module.display());
        }
        let scope = Scope::new(module, project_root);
        if scope.is_project_root() {
            tracing::warn!(
                "Skipping module {}: it is the project root",
                module.display()
            );
            continue;
        }
        scopes.push(scope);
    }

    tracing::info!(
        "Processing {} finding(s) over {} scope(s) with resolvers for {}",
        findings.len(),
        scopes.len(),
        registry.languages().join(", ")
    );

    let mut report = IssueReport::new();
    for scope in &scopes {
        IssueEmitter::with_settings(&registry, scope, settings.clone())
            .process_all(&findings, &mut report)
            .with_context(|| format!("Failed to emit issues for {}", scope.root().display()))?;
        report.scopes_processed += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const REPORT: &str = r#"{
      "rules": [
        { "kind": "concept", "id": "layer:Modules", "description": "Modules are labelled" },
        { "kind": "constraint", "id": "dep:Cycles", "description": "No cycles", "severity": "blocker",
          "result": { "primary-column": "Type", "rows": [
            [ { "name": "Type", "value": "com.acme.Cart",
                "source": { "language": "Java", "element": "Type", "path": "/com/acme/Cart.class", "line": 7 } } ]
          ] } }
      ]
    }"#;

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let report = tmp.path().join("target/jqassistant");
        fs::create_dir_all(&report).unwrap();
        fs::write(report.join("jqassistant-report.json"), REPORT).unwrap();
        let sources = tmp.path().join("shop/src/main/java/com/acme");
        fs::create_dir_all(&sources).unwrap();
        fs::write(sources.join("Cart.java"), "class Cart {}\n").unwrap();
        tmp
    }

    #[test]
    fn root_and_module_scopes() {
        let tmp = project();
        let report = collect(
            &Config::default(),
            tmp.path(),
            None,
            &[tmp.path().join("shop")],
        )
        .unwrap();

        assert_eq!(report.scopes_processed, 2);
        let messages: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
        insta::assert_snapshot!(messages.join("\n"), @r"
        <project>: major [jQAssistant:InvalidConcept] [layer:Modules] The concept could not be applied: Modules are labelled
        <project>: blocker [jQAssistant:ConstraintViolation] [dep:Cycles] No cycles | Type=com.acme.Cart
        src/main/java/com/acme/Cart.java:7:0: blocker [jQAssistant:ConstraintViolation] [dep:Cycles] No cycles
        ");
    }

    #[test]
    fn report_override_and_missing_report() {
        let tmp = project();
        let err = collect(
            &Config::default(),
            tmp.path(),
            Some(&tmp.path().join("missing.json")),
            &[],
        )
        .unwrap_err();
        assert!(err.to_string().contains("jqa_sonar::report::io"));
    }

    #[test]
    fn module_equal_to_project_root_is_processed_once() {
        let tmp = project();
        let report = collect(
            &Config::default(),
            tmp.path(),
            None,
            &[tmp.path().join("."), tmp.path().join("shop")],
        )
        .unwrap();

        assert_eq!(report.scopes_processed, 2);
        let at_root = report
            .issues
            .iter()
            .filter(|issue| issue.location.is_project_root())
            .count();
        assert_eq!(at_root, 2);
    }

    #[test]
    fn missing_module_is_an_error() {
        let tmp = project();
        let err = collect(
            &Config::default(),
            tmp.path(),
            None,
            &[tmp.path().join("nope")],
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Module directory not found"));
    }

    #[test]
    fn configured_rule_keys_are_used() {
        let tmp = project();
        let config = Config::parse("[rules]\nrepository = \"arch\"\n").unwrap();
        let report = collect(&config, tmp.path(), None, &[]).unwrap();
        assert!(report
            .issues
            .iter()
            .all(|issue| issue.rule_key.repository == "arch"));
    }
}
