//! Pure domain model for evaluated rules.
//!
//! Built once from a loaded report and consumed read-only by the emitter.
//! Contains no serde and no I/O.

use crate::types::Severity;
use std::fmt;

/// The two rule kinds produced by an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// A concept: enriches the model, reported only when it could not be applied.
    Concept,
    /// A constraint: every result row is a violation.
    Constraint,
}

impl RuleKind {
    /// Returns the lowercase name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Constraint => "constraint",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an evaluated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    /// Rule id (e.g., `"java:WriteField"`).
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Severity declared by the rule, if any.
    pub severity: Option<Severity>,
}

impl RuleInfo {
    /// Creates rule info without a declared severity.
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            severity: None,
        }
    }

    /// Sets the declared severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

/// A single evaluated rule taken from the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A concept that could not be applied. Never carries rows.
    ConceptFailure(RuleInfo),
    /// A constraint together with its (possibly absent) result.
    Constraint {
        /// Rule identity.
        rule: RuleInfo,
        /// Result table; absent means zero rows.
        result: Option<ResultSet>,
    },
}

impl Finding {
    /// Creates a concept failure finding.
    #[must_use]
    pub fn concept_failure(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::ConceptFailure(RuleInfo::new(id, description))
    }

    /// Creates a constraint finding.
    #[must_use]
    pub fn constraint(
        id: impl Into<String>,
        description: impl Into<String>,
        result: Option<ResultSet>,
    ) -> Self {
        Self::Constraint {
            rule: RuleInfo::new(id, description),
            result,
        }
    }

    /// Returns the kind of this finding.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::ConceptFailure(_) => RuleKind::Concept,
            Self::Constraint { .. } => RuleKind::Constraint,
        }
    }

    /// Returns the rule identity.
    #[must_use]
    pub fn rule(&self) -> &RuleInfo {
        match self {
            Self::ConceptFailure(rule) | Self::Constraint { rule, .. } => rule,
        }
    }

    /// Returns the rule id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.rule().id
    }
}

/// Tabular result of a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    primary_column: Option<String>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Creates a result set.
    ///
    /// `primary_column` names the anchor column of every row.
    #[must_use]
    pub fn new(primary_column: Option<String>, rows: Vec<Row>) -> Self {
        Self {
            primary_column,
            rows,
        }
    }

    /// Name of the anchor column, if the rule declared one.
    #[must_use]
    pub fn primary_column(&self) -> Option<&str> {
        self.primary_column.as_deref()
    }

    /// Rows in report order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// One row of a result set; column order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    columns: Vec<Column>,
}

impl Row {
    /// Creates a row from columns in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error if two columns share a name.
    pub fn new(columns: Vec<Column>) -> Result<Self, ModelError> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(ModelError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A named cell of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, unique within the row.
    pub name: String,
    /// Rendered value.
    pub value: String,
    /// Symbolic source position of the value, if the analyzer knew one.
    pub source: Option<SourceRef>,
}

impl Column {
    /// Creates a column without a source reference.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            source: None,
        }
    }

    /// Attaches a source reference.
    #[must_use]
    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = Some(source);
        self
    }

    /// Renders the column as `name=value`.
    #[must_use]
    pub fn pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// A language-agnostic reference to a source position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef {
    /// Language tag, matched case-insensitively against resolvers.
    pub language: String,
    /// Symbolic path (e.g., `com/acme/Bar.class`).
    pub symbolic_path: String,
    /// Element type descriptor (e.g., `"Type"`, `"WriteField"`).
    pub element: String,
    /// 1-based line; 0 means unknown.
    pub line: usize,
}

impl SourceRef {
    /// Creates a source reference.
    #[must_use]
    pub fn new(
        language: impl Into<String>,
        symbolic_path: impl Into<String>,
        element: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            language: language.into(),
            symbolic_path: symbolic_path.into(),
            element: element.into(),
            line,
        }
    }
}

/// Errors raised while building the domain model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Two columns in the same row share a name.
    #[error("duplicate column '{name}' in result row")]
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },
}
