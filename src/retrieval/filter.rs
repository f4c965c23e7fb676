//! Search filter synthesis
//!
//! Builds the boolean filter expression handed verbatim to the search
//! collaborator: a disjunction of destination equalities and a conjunction
//! of category membership tests, each independently parenthesized so
//! operator precedence cannot leak across clause boundaries.

use crate::error::{Result, WayfarerError};
use crate::types::{validate_category_tag, validate_destination_code};

use super::Eligibility;

/// Outcome of filter synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No restriction applies; query without a filter
    Unfiltered,
    /// Restriction expressed in the collaborator's boolean grammar
    Filter(String),
    /// Constraints were supplied but nothing satisfies them; the query
    /// must yield zero hits without being issued
    Empty,
}

impl FilterOutcome {
    /// The filter expression to pass to the collaborator, if one applies
    pub fn as_filter(&self) -> Option<&str> {
        match self {
            FilterOutcome::Filter(expr) => Some(expr),
            _ => None,
        }
    }
}

/// Compose the eligibility set and category tags into one filter expression.
///
/// An absent constraint set omits its group outright; it never degrades
/// into an empty-result clause. Every interpolated value is charset-checked
/// first, since the expression is handed to an external parser.
pub fn synthesize(eligibility: &Eligibility, categories: &[String]) -> Result<FilterOutcome> {
    let code_group = match eligibility.codes() {
        None => None,
        Some(codes) if codes.is_empty() => return Ok(FilterOutcome::Empty),
        Some(codes) => {
            let clauses: Result<Vec<String>> = codes
                .iter()
                .map(|code| {
                    validate_destination_code(code)
                        .map_err(|e| WayfarerError::InvalidInput(e.to_string()))?;
                    Ok(format!("(destination == '{}')", code))
                })
                .collect();
            Some(clauses?.join(" OR "))
        }
    };

    let category_group = if categories.is_empty() {
        None
    } else {
        let clauses: Result<Vec<String>> = categories
            .iter()
            .map(|tag| {
                validate_category_tag(tag)
                    .map_err(|e| WayfarerError::InvalidInput(e.to_string()))?;
                Ok(format!("(category CONTAINS '{}')", tag))
            })
            .collect();
        Some(clauses?.join(" AND "))
    };

    let expr = match (code_group, category_group) {
        (None, None) => return Ok(FilterOutcome::Unfiltered),
        (Some(codes), None) => codes,
        (None, Some(tags)) => tags,
        (Some(codes), Some(tags)) => {
            format!("{} AND {}", parenthesize(codes), parenthesize(tags))
        }
    };

    Ok(FilterOutcome::Filter(expr))
}

/// Wrap a multi-clause group so it binds tighter than the joining AND.
/// Single clauses are already parenthesized.
fn parenthesize(group: String) -> String {
    if group.contains(" OR ") || group.contains(" AND ") {
        format!("({})", group)
    } else {
        group
    }
}
