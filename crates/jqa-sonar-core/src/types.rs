//! Core types for emitted issues and their locations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Severity of an emitted issue, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding.
    Info,
    /// Minor issue.
    Minor,
    /// Major issue (default for both rule kinds).
    #[default]
    Major,
    /// Critical issue.
    Critical,
    /// Blocker, must be fixed before release.
    Blocker,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Info,
        Self::Minor,
        Self::Major,
        Self::Critical,
        Self::Blocker,
    ];

    /// Parses a severity name case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Returns the lowercase name of this severity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Critical => "critical",
            Self::Blocker => "blocker",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the host-tool rule an issue is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    /// Rule repository (e.g., `"jQAssistant"`).
    pub repository: String,
    /// Rule key within the repository (e.g., `"ConstraintViolation"`).
    pub rule: String,
}

impl RuleKey {
    /// Creates a new rule key.
    #[must_use]
    pub fn new(repository: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.rule)
    }
}

/// A resource resolved inside the current scope.
///
/// Treated as an opaque handle by the emitter; only the resolver that
/// produced it interprets the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// Lower-cased language tag of the resolver that produced this handle.
    pub language: String,
    /// Path relative to the scope root.
    pub path: PathBuf,
}

impl Resource {
    /// Creates a new resource handle.
    #[must_use]
    pub fn new(language: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            language: language.into(),
            path: path.into(),
        }
    }
}

/// A text range inside a resource.
///
/// Fields are private so a range can only be built with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
}

impl LineRange {
    /// Creates a range, returning `None` if the end lies before the start.
    #[must_use]
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self {
            start_line: start.0,
            start_column: start.1,
            end_line: end.0,
            end_column: end.1,
        })
    }

    /// Creates a zero-width range at column 0 of a 1-based line.
    #[must_use]
    pub fn at_line(line: usize) -> Self {
        Self {
            start_line: line,
            start_column: 0,
            end_line: line,
            end_column: 0,
        }
    }

    /// First line (1-based).
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// First column (0-based).
    #[must_use]
    pub fn start_column(&self) -> usize {
        self.start_column
    }

    /// Last line (1-based).
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.end_line
    }

    /// Last column (0-based).
    #[must_use]
    pub fn end_column(&self) -> usize {
        self.end_column
    }
}

/// A concrete position produced by a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// The resolved resource.
    pub resource: Resource,
    /// Range inside the resource; `None` means the whole resource.
    pub range: Option<LineRange>,
}

impl ResolvedLocation {
    /// Creates a new resolved location.
    #[must_use]
    pub fn new(resource: Resource, range: Option<LineRange>) -> Self {
        Self { resource, range }
    }

    /// Returns the first line of the range, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.range.map(|r| r.start_line())
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some(range) => write!(
                f,
                "{}:{}:{}",
                self.resource.path.display(),
                range.start_line(),
                range.start_column()
            ),
            None => write!(f, "{}", self.resource.path.display()),
        }
    }
}

/// Where an issue is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IssueLocation {
    /// Attached to a resolved resource.
    Resource(ResolvedLocation),
    /// Attached to the project as a whole.
    ProjectRoot,
}

impl IssueLocation {
    /// Returns the resolved location, if the issue is attached to a resource.
    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedLocation> {
        match self {
            Self::Resource(location) => Some(location),
            Self::ProjectRoot => None,
        }
    }

    /// Returns true if the issue is attached to the project root.
    #[must_use]
    pub fn is_project_root(&self) -> bool {
        matches!(self, Self::ProjectRoot)
    }
}

impl fmt::Display for IssueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(location) => write!(f, "{location}"),
            Self::ProjectRoot => f.write_str("<project>"),
        }
    }
}

/// An additional location attached to an issue, labelled by its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryLocation {
    /// Resolved position.
    pub location: ResolvedLocation,
    /// Label, rendered as `name=value`.
    pub message: String,
}

impl SecondaryLocation {
    /// Creates a new secondary location.
    #[must_use]
    pub fn new(location: ResolvedLocation, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

/// An issue handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Rule this issue is filed under.
    pub rule_key: RuleKey,
    /// Severity of this issue.
    pub severity: Severity,
    /// Identifier of the concept or constraint that produced it.
    pub finding_id: String,
    /// Human-readable message.
    pub message: String,
    /// Primary location.
    pub location: IssueLocation,
    /// Further resolved locations referenced by the same row.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<SecondaryLocation>,
}

impl Issue {
    /// Creates a new issue without secondary locations.
    #[must_use]
    pub fn new(
        rule_key: RuleKey,
        severity: Severity,
        finding_id: impl Into<String>,
        message: impl Into<String>,
        location: IssueLocation,
    ) -> Self {
        Self {
            rule_key,
            severity,
            finding_id: finding_id.into(),
            message: message.into(),
            location,
            secondary: Vec::new(),
        }
    }

    /// Adds a secondary location to this issue.
    #[must_use]
    pub fn with_secondary(mut self, secondary: SecondaryLocation) -> Self {
        self.secondary.push(secondary);
        self
    }

    /// Formats the issue for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} at {}\n", self.rule_key, self.location);
        for line in self.message.lines() {
            let _ = writeln!(output, "  {}: {line}", self.severity);
        }
        for secondary in &self.secondary {
            let _ = writeln!(
                output,
                "  = also: {} ({})",
                secondary.location, secondary.message
            );
        }
        output
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.location,
            self.severity,
            self.rule_key,
            self.message.replace('\n', " | ")
        )
    }
}

/// Issues collected over one or more runs.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IssueReport {
    /// All issues in emission order.
    pub issues: Vec<Issue>,
    /// Number of scopes processed.
    pub scopes_processed: usize,
}

impl IssueReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any issue meets or exceeds the given severity.
    #[must_use]
    pub fn has_issues_at(&self, severity: Severity) -> bool {
        self.issues.iter().any(|i| i.severity >= severity)
    }


    /// Counts issues per severity, in ascending severity order.
    #[must_use]
    pub fn count_by_severity(&self) -> [(Severity, usize); 5] {
        Severity::ALL.map(|s| (s, self.issues.iter().filter(|i| i.severity == s).count()))
    }

    /// Formats a one-line summary of the report.
    #[must_use]
    pub fn summary(&self) -> String {
        let counts = self
            .count_by_severity()
            .iter()
            .rev()
            .map(|(severity, count)| format!("{count} {severity}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Found {} issue(s) ({counts}) in {} scope(s)",
            self.issues.len(),
            self.scopes_processed
        )
    }

    /// Adds issues from another report.
    pub fn extend(&mut self, other: Self) {
        self.issues.extend(other.issues);
        self.scopes_processed += other.scopes_processed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(severity: Severity) -> Issue {
        Issue::new(
            RuleKey::new("jQAssistant", "ConstraintViolation"),
            severity,
            "test:Constraint",
            "[test:Constraint] TestConstraint",
            IssueLocation::Resource(ResolvedLocation::new(
                Resource::new("java", "src/main/java/com/acme/Bar.java"),
                Some(LineRange::at_line(16)),
            )),
        )
    }

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("MAJOR"), Some(Severity::Major));
        assert_eq!(Severity::parse(" blocker "), Some(Severity::Blocker));
        assert_eq!(Severity::parse("fatal"), None);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Minor);
        assert!(Severity::Critical < Severity::Blocker);
        assert_eq!(Severity::default(), Severity::Major);
    }

    #[test]
    fn line_range_rejects_reversed_endpoints() {
        assert!(LineRange::new((16, 4), (16, 0)).is_none());
        assert!(LineRange::new((15, 9), (16, 0)).is_some());
    }

    #[test]
    fn at_line_is_zero_width() {
        let range = LineRange::at_line(16);
        assert_eq!(range.start_line(), range.end_line());
        assert_eq!(range.start_column(), 0);
        assert_eq!(range.end_column(), 0);
    }

    #[test]
    fn display_resource_location() {
        let issue = make_issue(Severity::Major);
        assert_eq!(
            issue.to_string(),
            "src/main/java/com/acme/Bar.java:16:0: major [jQAssistant:ConstraintViolation] [test:Constraint] TestConstraint"
        );
    }

    #[test]
    fn display_project_root_flattens_message() {
        let mut issue = make_issue(Severity::Minor);
        issue.location = IssueLocation::ProjectRoot;
        issue.message = "[x] Desc\nValue=Test".into();
        assert_eq!(
            issue.to_string(),
            "<project>: minor [jQAssistant:ConstraintViolation] [x] Desc | Value=Test"
        );
    }

    #[test]
    fn format_includes_secondary_locations() {
        let issue = make_issue(Severity::Major).with_secondary(SecondaryLocation::new(
            ResolvedLocation::new(Resource::new("java", "src/main/java/com/acme/Foo.java"), None),
            "Caller=Foo",
        ));
        let formatted = issue.format();
        assert!(formatted.contains("= also: src/main/java/com/acme/Foo.java (Caller=Foo)"));
    }

    #[test]
    fn report_threshold_checks() {
        let mut report = IssueReport::new();
        report.issues.push(make_issue(Severity::Minor));
        assert!(report.has_issues_at(Severity::Minor));
        assert!(!report.has_issues_at(Severity::Major));
    }

    #[test]
    fn report_summary_counts() {
        let mut report = IssueReport::new();
        report.scopes_processed = 2;
        report.issues.push(make_issue(Severity::Major));
        report.issues.push(make_issue(Severity::Blocker));
        assert_eq!(
            report.summary(),
            "Found 2 issue(s) (1 blocker, 0 critical, 1 major, 0 minor, 0 info) in 2 scope(s)"
        );
    }
}
