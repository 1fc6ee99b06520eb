//! Per-scope issue emission.
//!
//! Each finding runs through the same steps:
//!
//! ```text
//! dispatch ──► concept failure ──► project root? ──► emit | drop
//!          └─► constraint ──► for each row:
//!                 resolve anchor ──► resolved ──────────────► emit at resource
//!                                └─► not resolved ─► project root? ─► emit at root | drop
//! ```
//!
//! A row yields at most one issue. Unlocated findings surface only in the
//! project-root scope so a multi-module run reports them once.

use crate::dispatch::{dispatch, RuleKeys, RulePath};
use crate::message;
use crate::model::{Finding, ResultSet, Row, RuleInfo, RuleKind};
use crate::resolver::ResolverRegistry;
use crate::scope::Scope;
use crate::sink::{IssueSink, SinkError};
use crate::types::{Issue, IssueLocation, SecondaryLocation, Severity};

use tracing::{debug, info};

/// Rule keys and default severities applied to emitted issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterSettings {
    /// Rule key per finding kind.
    pub rule_keys: RuleKeys,
    /// Severity for concept failures without a declared severity.
    pub concept_severity: Severity,
    /// Severity for constraint violations without a declared severity.
    pub constraint_severity: Severity,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            rule_keys: RuleKeys::default(),
            concept_severity: Severity::Major,
            constraint_severity: Severity::Major,
        }
    }
}

impl EmitterSettings {
    fn severity(&self, kind: RuleKind, rule: &RuleInfo) -> Severity {
        rule.severity.unwrap_or(match kind {
            RuleKind::Concept => self.concept_severity,
            RuleKind::Constraint => self.constraint_severity,
        })
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Findings processed.
    pub findings: usize,
    /// Issues attached to a resolved resource.
    pub anchored: usize,
    /// Issues attached to the project root.
    pub at_project_root: usize,
    /// Unresolved constraint rows dropped outside the project-root scope.
    pub dropped_rows: usize,
    /// Concept failures dropped outside the project-root scope.
    pub dropped_concepts: usize,
}

impl RunSummary {
    /// Total number of issues handed to the sink.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.anchored + self.at_project_root
    }
}

/// A run aborted because the sink failed.
///
/// Carries the counters for everything recorded before the failure.
#[derive(Debug, thiserror::Error)]
#[error("issue sink failed after {} issue(s): {source}", .summary.emitted())]
pub struct RunError {
    /// Work completed before the failure.
    pub summary: RunSummary,
    /// The sink failure.
    #[source]
    pub source: SinkError,
}

/// Where a row ends up.
enum Placement {
    Resource(Issue),
    ProjectRoot(Issue),
    Dropped,
}

/// Emits issues for findings within a single scope.
///
/// The scope is fixed for the emitter's lifetime; build one emitter per
/// scope and share the registry between them.
#[derive(Debug)]
pub struct IssueEmitter<'a> {
    registry: &'a ResolverRegistry,
    scope: &'a Scope,
    settings: EmitterSettings,
    at_project_root: bool,
}

impl<'a> IssueEmitter<'a> {
    /// Creates an emitter with default settings.
    #[must_use]
    pub fn new(registry: &'a ResolverRegistry, scope: &'a Scope) -> Self {
        Self::with_settings(registry, scope, EmitterSettings::default())
    }

    /// Creates an emitter with explicit settings.
    #[must_use]
    pub fn with_settings(
        registry: &'a ResolverRegistry,
        scope: &'a Scope,
        settings: EmitterSettings,
    ) -> Self {
        Self {
            registry,
            scope,
            settings,
            at_project_root: scope.is_project_root(),
        }
    }


    /// Processes findings in order, recording issues into `sink`.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] carrying the partial summary if the sink
    /// fails. Resolution problems never abort the run.
    pub fn process_all<'f, I>(
        &self,
        findings: I,
        sink: &mut dyn IssueSink,
    ) -> Result<RunSummary, RunError>
    where
        I: IntoIterator<Item = &'f Finding>,
    {
        info!(
            "Emitting issues for scope {} (project root: {})",
            self.scope.root().display(),
            self.at_project_root
        );

        let mut summary = RunSummary::default();
        for finding in findings {
            if let Err(source) = self.process(finding, sink, &mut summary) {
                return Err(RunError { summary, source });
            }
        }

        info!(
            "Scope {} done: {} issue(s), {} row(s) and {} concept(s) out of scope",
            self.scope.root().display(),
            summary.emitted(),
            summary.dropped_rows,
            summary.dropped_concepts
        );
        Ok(summary)
    }

    /// Processes a single finding, updating `summary`.
    ///
    /// # Errors
    ///
    /// Returns the sink error if recording an issue fails.
    pub fn process(
        &self,
        finding: &Finding,
        sink: &mut dyn IssueSink,
        summary: &mut RunSummary,
    ) -> Result<(), SinkError> {
        summary.findings += 1;
        match dispatch(finding) {
            RulePath::Concept(rule) => self.process_concept(rule, sink, summary),
            RulePath::Constraint { rule, result } => {
                let Some(result) = result else {
                    debug!("Constraint {} has no result rows", rule.id);
                    return Ok(());
                };
                self.process_rows(rule, result, sink, summary)
            }
        }
    }

    fn process_concept(
        &self,
        rule: &RuleInfo,
        sink: &mut dyn IssueSink,
        summary: &mut RunSummary,
    ) -> Result<(), SinkError> {
        if !self.at_project_root {
            debug!("Concept {} reported at project root only", rule.id);
            summary.dropped_concepts += 1;
            return Ok(());
        }

        let issue = Issue::new(
            self.settings.rule_keys.for_kind(RuleKind::Concept).clone(),
            self.settings.severity(RuleKind::Concept, rule),
            rule.id.clone(),
            message::concept_failure(rule),
            IssueLocation::ProjectRoot,
        );
        sink.record(issue)?;
        summary.at_project_root += 1;
        Ok(())
    }

    fn process_rows(
        &self,
        rule: &RuleInfo,
        result: &ResultSet,
        sink: &mut dyn IssueSink,
        summary: &mut RunSummary,
    ) -> Result<(), SinkError> {
        for row in result.rows() {
            match self.place_row(rule, result.primary_column(), row) {
                Placement::Resource(issue) => {
                    sink.record(issue)?;
                    summary.anchored += 1;
                }
                Placement::ProjectRoot(issue) => {
                    sink.record(issue)?;
                    summary.at_project_root += 1;
                }
                Placement::Dropped => summary.dropped_rows += 1,
            }
        }
        Ok(())
    }

    fn place_row(&self, rule: &RuleInfo, primary: Option<&str>, row: &Row) -> Placement {
        let rule_key = self.settings.rule_keys.for_kind(RuleKind::Constraint);
        let severity = self.settings.severity(RuleKind::Constraint, rule);

        let anchor = primary.and_then(|name| row.column(name));
        let location = anchor
            .and_then(|column| column.source.as_ref())
            .and_then(|source| self.registry.resolve(self.scope, source).into_location());

        if let Some(location) = location {
            let excluded = anchor.map(|column| column.name.as_str());
            let mut issue = Issue::new(
                rule_key.clone(),
                severity,
                rule.id.clone(),
                message::row_message(rule, excluded, row),
                IssueLocation::Resource(location),
            );
            issue.secondary = self.secondary_locations(row, excluded);
            return Placement::Resource(issue);
        }

        if !self.at_project_root {
            debug!(
                "Dropping unresolved row of {} in module scope {}",
                rule.id,
                self.scope.root().display()
            );
            return Placement::Dropped;
        }

        Placement::ProjectRoot(Issue::new(
            rule_key.clone(),
            severity,
            rule.id.clone(),
            message::row_message(rule, None, row),
            IssueLocation::ProjectRoot,
        ))
    }

    fn secondary_locations(&self, row: &Row, anchor: Option<&str>) -> Vec<SecondaryLocation> {
        row.columns()
            .iter()
            .filter(|column| Some(column.name.as_str()) != anchor)
            .filter_map(|column| {
                let source = column.source.as_ref()?;
                let location = self.registry.resolve(self.scope, source).into_location()?;
                Some(SecondaryLocation::new(location, column.pair()))
            })
            .collect()
    }
}
