//! Analysis report loading.
//!
//! # Architecture
//!
//! ```text
//! JSON text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert
//! Vec<Finding> (pure domain model)
//! ```

use crate::model::Finding;
use miette::Diagnostic;
use std::path::{Path, PathBuf};

pub mod dto;
pub mod loader;

/// Errors from reading and converting a report.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ReportError {
    /// The report file could not be read.
    #[error("failed to read report {path}: {source}")]
    #[diagnostic(
        code(jqa_sonar::report::io),
        help("run the analysis first, or point `report.path` at the generated report")
    )]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The report is not valid JSON for the expected schema.
    #[error("invalid report JSON: {0}")]
    #[diagnostic(code(jqa_sonar::report::json))]
    Json(#[from] serde_json::Error),

    /// The report content violates the model.
    #[error("invalid report: {0}")]
    #[diagnostic(
        code(jqa_sonar::report::invalid),
        help("the report is produced by the analyzer; regenerate it with a matching version")
    )]
    Load(#[from] loader::LoadError),
}

/// Parses report JSON into findings.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or violates the model.
pub fn parse_report(content: &str) -> Result<Vec<Finding>, ReportError> {
    let dto: dto::ReportDto = serde_json::from_str(content)?;
    Ok(loader::load(dto)?)
}

/// Reads and parses a report file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_report(path: &Path) -> Result<Vec<Finding>, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let findings = parse_report(&content)?;
    tracing::debug!("Loaded {} finding(s) from {}", findings.len(), path.display());
    Ok(findings)
}
