//! JSON deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to domain model types via the loader.

use serde::Deserialize;

/// Raw JSON representation of an analysis report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportDto {
    /// Evaluated concepts and constraints in report order.
    #[serde(default)]
    pub rules: Vec<RuleDto>,
}

/// One evaluated rule.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDto {
    /// `"concept"` or `"constraint"`.
    pub kind: String,
    /// Rule id.
    pub id: String,
    /// Rule description.
    #[serde(default)]
    pub description: String,
    /// Evaluation status (`"success"`, `"failure"`, `"warning"`, `"skipped"`).
    #[serde(default)]
    pub status: Option<String>,
    /// Declared severity.
    #[serde(default)]
    pub severity: Option<String>,
    /// Result table.
    #[serde(default)]
    pub result: Option<ResultDto>,
}

/// A result table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResultDto {
    /// Name of the anchor column.
    #[serde(default)]
    pub primary_column: Option<String>,
    /// Rows, each a list of columns in declaration order.
    #[serde(default)]
    pub rows: Vec<Vec<ColumnDto>>,
}

/// One cell of a row.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDto {
    /// Column name.
    pub name: String,
    /// Rendered value.
    #[serde(default)]
    pub value: String,
    /// Symbolic source position.
    #[serde(default)]
    pub source: Option<SourceDto>,
}

/// Symbolic source position of a value.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDto {
    /// Language tag (e.g., `"Java"`).
    pub language: String,
    /// Element type (e.g., `"Type"`, `"MethodInvocation"`).
    #[serde(default)]
    pub element: String,
    /// Symbolic path (e.g., `"com/acme/Bar.class"`).
    pub path: String,
    /// 1-based line, if known.
    #[serde(default)]
    pub line: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_rule() {
        let dto: ReportDto =
            serde_json::from_str(r#"{"rules":[{"kind":"concept","id":"c"}]}"#).unwrap();
        assert_eq!(dto.rules.len(), 1);
        assert!(dto.rules[0].status.is_none());
        assert!(dto.rules[0].result.is_none());
        assert_eq!(dto.rules[0].description, "");
    }

    #[test]
    fn deserialize_source() {
        let json = r#"{"name":"Type","value":"Bar","source":{"language":"Java","path":"Bar.class","line":16}}"#;
        let column: ColumnDto = serde_json::from_str(json).unwrap();
        let source = column.source.unwrap();
        assert_eq!(source.line, Some(16));
        assert_eq!(source.element, "");
    }

    #[test]
    fn empty_document_has_no_rules() {
        let dto: ReportDto = serde_json::from_str("{}").unwrap();
        assert!(dto.rules.is_empty());
    }
}
