//! DTO → Domain model conversion with validation.

use crate::model::{Column, Finding, ModelError, ResultSet, Row, RuleInfo, RuleKind, SourceRef};
use crate::types::Severity;

use super::dto::{ColumnDto, ReportDto, ResultDto, RuleDto, SourceDto};
use tracing::debug;

/// Errors during DTO → Domain conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The rule kind is neither `concept` nor `constraint`.
    #[error("{context}: {source}")]
    UnknownKind {
        /// Where the error occurred (e.g., "rules[3]").
        context: String,
        /// The underlying parse error.
        source: crate::dispatch::UnknownKindError,
    },

    /// Unknown severity string.
    #[error("{context}: unknown severity `{value}`, expected: info, minor, major, critical, blocker")]
    UnknownSeverity {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Unknown evaluation status.
    #[error("{context}: unknown status `{value}`, expected: success, failure, warning, skipped")]
    UnknownStatus {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// A row violates a model invariant.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "rules[1].result.rows[0]").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },
}

/// Evaluation status of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Failure,
    Warning,
    Skipped,
}

/// Converts a `ReportDto` to findings in report order.
///
/// Concepts that were applied (`success`) or `skipped` are not findings
/// and are left out.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: ReportDto) -> Result<Vec<Finding>, LoadError> {
    let mut findings = Vec::with_capacity(dto.rules.len());
    for (index, rule) in dto.rules.into_iter().enumerate() {
        if let Some(finding) = convert_rule(rule, index)? {
            findings.push(finding);
        }
    }
    Ok(findings)
}

fn convert_rule(dto: RuleDto, index: usize) -> Result<Option<Finding>, LoadError> {
    let ctx = format!("rules[{index}]");
    let kind: RuleKind = dto.kind.parse().map_err(|e| LoadError::UnknownKind {
        context: ctx.clone(),
        source: e,
    })?;
    let status = parse_status(dto.status.as_deref(), &ctx)?;

    let mut rule = RuleInfo::new(dto.id, dto.description);
    if let Some(value) = dto.severity {
        let severity = Severity::parse(&value).ok_or_else(|| LoadError::UnknownSeverity {
            context: format!("{ctx}.severity"),
            value,
        })?;
        rule = rule.with_severity(severity);
    }

    match kind {
        RuleKind::Concept => {
            if matches!(status, Status::Success | Status::Skipped) {
                debug!("Concept {} was applied, not a finding", rule.id);
                return Ok(None);
            }
            Ok(Some(Finding::ConceptFailure(rule)))
        }
        RuleKind::Constraint => {
            let result = dto
                .result
                .map(|r| convert_result(r, &format!("{ctx}.result")))
                .transpose()?;
            Ok(Some(Finding::Constraint { rule, result }))
        }
    }
}

fn parse_status(value: Option<&str>, ctx: &str) -> Result<Status, LoadError> {
    let Some(value) = value else {
        return Ok(Status::Failure);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "success" => Ok(Status::Success),
        "failure" => Ok(Status::Failure),
        "warning" => Ok(Status::Warning),
        "skipped" => Ok(Status::Skipped),
        _ => Err(LoadError::UnknownStatus {
            context: format!("{ctx}.status"),
            value: value.to_string(),
        }),
    }
}

fn convert_result(dto: ResultDto, ctx: &str) -> Result<ResultSet, LoadError> {
    let rows = dto
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, columns)| {
            Row::new(columns.into_iter().map(convert_column).collect()).map_err(|e| {
                LoadError::Validation {
                    context: format!("{ctx}.rows[{i}]"),
                    source: e,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultSet::new(dto.primary_column, rows))
}

fn convert_column(dto: ColumnDto) -> Column {
    let column = Column::new(dto.name, dto.value);
    match dto.source {
        Some(source) => column.with_source(convert_source(source)),
        None => column,
    }
}

fn convert_source(dto: SourceDto) -> SourceRef {
    SourceRef::new(dto.language, dto.path, dto.element, dto.line.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<Finding>, LoadError> {
        load(serde_json::from_str(json).expect("valid JSON"))
    }

    #[test]
    fn failed_concept_becomes_finding() {
        let findings =
            parse(r#"{"rules":[{"kind":"concept","id":"c","description":"d"}]}"#).unwrap();
        assert_eq!(findings, vec![Finding::concept_failure("c", "d")]);
    }

    #[test]
    fn applied_concepts_are_skipped() {
        let findings = parse(
            r#"{"rules":[
                {"kind":"concept","id":"a","status":"success"},
                {"kind":"concept","id":"b","status":"SKIPPED"},
                {"kind":"concept","id":"c","status":"warning"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id(), "c");
    }

    #[test]
    fn constraint_rows_keep_order_and_sources() {
        let findings = parse(
            r#"{"rules":[{"kind":"constraint","id":"x","description":"d","severity":"Critical",
                "result":{"primary-column":"Type","rows":[
                    [{"name":"Type","value":"Bar","source":{"language":"Java","element":"Type","path":"Bar.class","line":16}},
                     {"name":"Field","value":"f"}]
                ]}}]}"#,
        )
        .unwrap();

        let Finding::Constraint { rule, result } = &findings[0] else {
            panic!("expected constraint");
        };
        assert_eq!(rule.severity, Some(Severity::Critical));
        let result = result.as_ref().unwrap();
        assert_eq!(result.primary_column(), Some("Type"));
        let row = &result.rows()[0];
        assert_eq!(row.columns()[1].name, "Field");
        assert_eq!(
            row.columns()[0].source,
            Some(SourceRef::new("Java", "Bar.class", "Type", 16))
        );
    }

    #[test]
    fn missing_line_becomes_zero() {
        let findings = parse(
            r#"{"rules":[{"kind":"constraint","id":"x","result":{"rows":[
                [{"name":"A","value":"1","source":{"language":"xml","path":"pom.xml"}}]
            ]}}]}"#,
        )
        .unwrap();
        let Finding::Constraint { result: Some(result), .. } = &findings[0] else {
            panic!("expected constraint with result");
        };
        assert_eq!(result.rows()[0].columns()[0].source.as_ref().map(|s| s.line), Some(0));
    }

    #[test]
    fn unknown_kind_is_fatal() {
        let err = parse(r#"{"rules":[{"kind":"group","id":"g"}]}"#).unwrap_err();
        assert!(matches!(err, LoadError::UnknownKind { ref context, .. } if context == "rules[0]"));
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let err = parse(r#"{"rules":[{"kind":"constraint","id":"x","severity":"fatal"}]}"#)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "rules[0].severity: unknown severity `fatal`, expected: info, minor, major, critical, blocker"
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = parse(r#"{"rules":[{"kind":"concept","id":"x","status":"pending"}]}"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::UnknownStatus { .. }));
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let err = parse(
            r#"{"rules":[{"kind":"constraint","id":"x","result":{"rows":[
                [{"name":"A","value":"1"},{"name":"A","value":"2"}]
            ]}}]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "rules[0].result.rows[0]: duplicate column 'A' in result row"
        );
    }
}
