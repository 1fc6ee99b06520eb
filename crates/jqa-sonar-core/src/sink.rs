//! Destination for emitted issues.

use crate::types::{Issue, IssueReport};
use std::io::Write;

/// Receives every emitted issue, exactly once per issue.
pub trait IssueSink {
    /// Records one issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be recorded. The run stops
    /// and reports the issues recorded so far.
    fn record(&mut self, issue: Issue) -> Result<(), SinkError>;
}

/// Failures while recording an issue.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing the issue failed.
    #[error("failed to write issue: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the issue failed.
    #[error("failed to serialize issue: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The host refused the issue.
    #[error("issue rejected: {0}")]
    Rejected(String),
}

impl IssueSink for Vec<Issue> {
    fn record(&mut self, issue: Issue) -> Result<(), SinkError> {
        self.push(issue);
        Ok(())
    }
}

impl IssueSink for IssueReport {
    fn record(&mut self, issue: Issue) -> Result<(), SinkError> {
        self.issues.push(issue);
        Ok(())
    }
}

/// Writes each issue as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of issues written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and returns the inner writer.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn into_inner(mut self) -> Result<W, SinkError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> IssueSink for JsonLinesSink<W> {
    fn record(&mut self, issue: Issue) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, &issue)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IssueLocation, RuleKey, Severity};

    fn issue() -> Issue {
        Issue::new(
            RuleKey::new("jQAssistant", "InvalidConcept"),
            Severity::Major,
            "test:Concept",
            "[test:Concept] The concept could not be applied: TestConcept",
            IssueLocation::ProjectRoot,
        )
    }

    #[test]
    fn json_lines_one_object_per_issue() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.record(issue()).unwrap();
        sink.record(issue()).unwrap();
        assert_eq!(sink.written(), 2);

        let bytes = sink.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["location"]["kind"], "project-root");
        assert_eq!(value["severity"], "major");
        assert_eq!(value["rule_key"]["rule"], "InvalidConcept");
    }

    #[test]
    fn report_collects_issues() {
        let mut report = IssueReport::new();
        report.record(issue()).unwrap();
        assert_eq!(report.issues.len(), 1);
    }
}
