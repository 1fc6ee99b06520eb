//! # jqa-sonar-core
//!
//! Turns evaluated jQAssistant rules into located issues for a
//! SonarQube-style host.
//!
//! This crate provides:
//!
//! - [`Finding`] and friends, the read-only result model
//! - [`ResourceResolver`] trait and [`ResolverRegistry`] for per-language
//!   location lookup
//! - [`IssueEmitter`] for the per-scope emission algorithm
//! - [`IssueSink`] for handing issues to the host
//!
//! ## Example
//!
//! ```ignore
//! use jqa_sonar_core::{IssueEmitter, IssueReport, ResolverRegistry, Scope};
//!
//! let findings = jqa_sonar_core::report::load_report(path)?;
//! let registry = ResolverRegistry::new().with(MyResolver::new());
//! let scope = Scope::project(".");
//!
//! let mut report = IssueReport::new();
//! IssueEmitter::new(&registry, &scope).process_all(&findings, &mut report)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatch;
mod emitter;
mod model;
mod resolver;
mod scope;
mod sink;
mod types;

pub mod message;
pub mod report;

pub use config::{
    Config, ConfigError, LanguageConfig, ReportConfig, ResolverConfig, RulesConfig, SeverityConfig,
};
pub use dispatch::{dispatch, RuleKeys, RulePath, UnknownKindError};
pub use emitter::{EmitterSettings, IssueEmitter, RunError, RunSummary};
pub use model::{Column, Finding, ModelError, ResultSet, Row, RuleInfo, RuleKind, SourceRef};
pub use resolver::{Resolution, ResolveError, ResolverBox, ResolverRegistry, ResourceResolver};
pub use scope::{normalize, Scope};
pub use sink::{IssueSink, JsonLinesSink, SinkError};
pub use types::{
    Issue, IssueLocation, IssueReport, LineRange, ResolvedLocation, Resource, RuleKey,
    SecondaryLocation, Severity,
};
