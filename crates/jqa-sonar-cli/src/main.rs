//! jqa-sonar CLI tool.
//!
//! Usage:
//! ```bash
//! jqa-sonar issues [OPTIONS] [PATH]
//! jqa-sonar list-rules
//! jqa-sonar init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use jqa_sonar_core::Severity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Reports jQAssistant rule results as located issues
#[derive(Parser)]
#[command(name = "jqa-sonar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn an analysis report into issues
    Issues {
        /// Project root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Report file (default: `report.path` from config, relative to PATH)
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Module directory to process as its own scope (repeatable)
        #[arg(short, long = "module")]
        modules: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exit with status 1 if an issue has at least this severity
        #[arg(long, value_parser = parse_severity)]
        fail_on: Option<Severity>,
    },

    /// List the rules issues are reported under
    ListRules {
        /// Project root used to find the configuration
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for issues.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-issue compact format.
    Compact,
}

fn parse_severity(value: &str) -> Result<Severity, String> {
    Severity::parse(value).ok_or_else(|| {
        format!("unknown severity `{value}`, expected: info, minor, major, critical, blocker")
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Issues {
            path,
            report,
            modules,
            format,
            fail_on,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let args = commands::issues::IssuesArgs {
                path,
                report,
                modules,
                format,
                fail_on,
            };
            commands::issues::run(&args, &source)
        }
        Commands::ListRules { path } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::list_rules::run(&source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_issues_arguments() {
        let cli = Cli::try_parse_from([
            "jqa-sonar",
            "-v",
            "issues",
            "project",
            "--module",
            "project/api",
            "-m",
            "project/web",
            "--fail-on",
            "Critical",
            "--format",
            "compact",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Issues {
            path,
            modules,
            fail_on,
            format,
            report,
        } = cli.command
        else {
            panic!("expected issues");
        };
        assert_eq!(path, PathBuf::from("project"));
        assert_eq!(modules.len(), 2);
        assert_eq!(fail_on, Some(Severity::Critical));
        assert!(matches!(format, OutputFormat::Compact));
        assert!(report.is_none());
    }

    #[test]
    fn rejects_unknown_severity() {
        assert!(Cli::try_parse_from(["jqa-sonar", "issues", "--fail-on", "fatal"]).is_err());
    }
}
