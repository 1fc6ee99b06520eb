//! Issue message rendering.
//!
//! Two shapes are produced:
//!
//! ```text
//! [<id>] The concept could not be applied: <description>
//! [<id>] <description>
//! <name>=<value>, <name>=<value>
//! ```
//!
//! The second line of a row message is omitted when no column remains
//! after excluding the anchor column.

use crate::model::{RuleInfo, Row};

/// Renders the message for a concept that could not be applied.
#[must_use]
pub fn concept_failure(rule: &RuleInfo) -> String {
    format!(
        "[{}] The concept could not be applied: {}",
        rule.id, rule.description
    )
}

/// Renders the message for one result row.
///
/// `excluded` names the column already conveyed by the issue location;
/// pass `None` to list every column.
#[must_use]
pub fn row_message(rule: &RuleInfo, excluded: Option<&str>, row: &Row) -> String {
    let mut message = format!("[{}] {}", rule.id, rule.description);
    let pairs = column_pairs(row, excluded);
    if !pairs.is_empty() {
        message.push('\n');
        message.push_str(&pairs);
    }
    message
}

/// Builds a message for a rule, with or without a row.
///
/// Without a row the concept-failure text is produced.
#[must_use]
pub fn build(rule: &RuleInfo, excluded: Option<&str>, row: Option<&Row>) -> String {
    match row {
        Some(row) => row_message(rule, excluded, row),
        None => concept_failure(rule),
    }
}

/// Joins `name=value` pairs of all columns except `excluded`, in row order.
#[must_use]
pub fn column_pairs(row: &Row, excluded: Option<&str>) -> String {
    row.columns()
        .iter()
        .filter(|c| Some(c.name.as_str()) != excluded)
        .map(crate::model::Column::pair)
        .collect::<Vec<_>>()
        .join(", ")
}
