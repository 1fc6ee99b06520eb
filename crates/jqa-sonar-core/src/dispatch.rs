//! Routing of findings by rule kind.

use crate::model::{Finding, ResultSet, RuleInfo, RuleKind};
use crate::types::RuleKey;
use std::str::FromStr;

/// Processing path selected for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulePath<'a> {
    /// A concept that could not be applied.
    Concept(&'a RuleInfo),
    /// A constraint and its rows.
    Constraint {
        /// Rule identity.
        rule: &'a RuleInfo,
        /// Result table, if the report carried one.
        result: Option<&'a ResultSet>,
    },
}

/// Selects the processing path for a finding.
#[must_use]
pub fn dispatch(finding: &Finding) -> RulePath<'_> {
    match finding {
        Finding::ConceptFailure(rule) => RulePath::Concept(rule),
        Finding::Constraint { rule, result } => RulePath::Constraint {
            rule,
            result: result.as_ref(),
        },
    }
}

/// A rule kind outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule kind '{kind}' (expected 'concept' or 'constraint')")]
pub struct UnknownKindError {
    /// The kind as written in the report.
    pub kind: String,
}

impl FromStr for RuleKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concept" => Ok(Self::Concept),
            "constraint" => Ok(Self::Constraint),
            _ => Err(UnknownKindError {
                kind: s.to_string(),
            }),
        }
    }
}

/// Host rule keys, one per rule kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleKeys {
    concept: RuleKey,
    constraint: RuleKey,
}

impl RuleKeys {
    /// Default repository key.
    pub const REPOSITORY: &'static str = "jQAssistant";
    /// Default rule key for concepts that could not be applied.
    pub const INVALID_CONCEPT: &'static str = "InvalidConcept";
    /// Default rule key for constraint violations.
    pub const CONSTRAINT_VIOLATION: &'static str = "ConstraintViolation";

    /// Creates rule keys from explicit values.
    #[must_use]
    pub fn new(concept: RuleKey, constraint: RuleKey) -> Self {
        Self {
            concept,
            constraint,
        }
    }

    /// Returns the rule key bound to a kind.
    #[must_use]
    pub fn for_kind(&self, kind: RuleKind) -> &RuleKey {
        match kind {
            RuleKind::Concept => &self.concept,
            RuleKind::Constraint => &self.constraint,
        }
    }
}

impl Default for RuleKeys {
    fn default() -> Self {
        Self {
            concept: RuleKey::new(Self::REPOSITORY, Self::INVALID_CONCEPT),
            constraint: RuleKey::new(Self::REPOSITORY, Self::CONSTRAINT_VIOLATION),
        }
    }
}
