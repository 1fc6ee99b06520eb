//! List rules command implementation.

use anyhow::Result;
use jqa_sonar_core::RuleKind;
use jqa_sonar_lang::registry_from_config;

use crate::config_resolver::ConfigSource;

/// Runs the list-rules command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let settings = config.emitter_settings();

    println!("Rules:\n");
    println!("{:<45} {:<10} Reported for", "Key", "Severity");
    println!("{}", "-".repeat(80));
    for (kind, severity, purpose) in [
        (
            RuleKind::Concept,
            settings.concept_severity,
            "concepts that could not be applied",
        ),
        (
            RuleKind::Constraint,
            settings.constraint_severity,
            "each constraint violation row",
        ),
    ] {
        println!(
            "{:<45} {:<10} {}",
            settings.rule_keys.for_kind(kind).to_string(),
            severity.as_str(),
            purpose
        );
    }

    let registry = registry_from_config(&config)?;
    println!("\nResolvers: {}", registry.languages().join(", "));
    if let Some(threshold) = config.fail_on {
        println!("Fails on: {threshold} and above");
    }

    println!("\nFindings may declare their own severity, which takes precedence.");
    Ok(())
}
