//! Filter engine.
//!
//! Computes the subset of dataset rows matching a [`FilterCriterion`] over a
//! set of searched columns. The result is a list of row indices in dataset
//! order, so it is always an order-preserving subsequence of the rows.
//!
//! Substring matching is case-insensitive; regex matching runs on the raw
//! cell text and is case-sensitive unless the pattern carries `(?i)`.

use crate::model::Dataset;
use regex::Regex;
use thiserror::Error;

// ===== FilterMode =====

/// How the pattern is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Case-folded containment test.
    #[default]
    Substring,
    /// Regular expression, matched against the raw cell text.
    Regex,
}

impl FilterMode {
    /// Short label shown next to the filter input.
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::Substring => "substring",
            FilterMode::Regex => "regex",
        }
    }
}

// ===== FilterCriterion =====

/// Match mode plus pattern text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriterion {
    /// Interpretation of `pattern`.
    pub mode: FilterMode,
    /// Pattern as typed by the user.
    pub pattern: String,
}

impl FilterCriterion {
    /// Build a criterion from a mode and pattern.
    pub fn new(mode: FilterMode, pattern: impl Into<String>) -> Self {
        Self {
            mode,
            pattern: pattern.into(),
        }
    }
}

// ===== FilterError =====

/// Why a criterion could not be applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The pattern is not a valid regular expression.
    #[error("invalid regex {pattern:?}: {reason}")]
    InvalidRegex {
        /// Pattern that failed to compile.
        pattern: String,
        /// Compiler message.
        reason: String,
    },
}

// ===== Filter Execution =====

/// Apply `criterion` to `dataset`, searching only `filter_columns`.
///
/// A row is kept when any searched column matches. An empty substring
/// pattern keeps every row. Returns the kept row indices in dataset order.
///
/// # Errors
///
/// Returns [`FilterError::InvalidRegex`] when a regex pattern does not
/// compile. The caller keeps its previous result in that case.
pub fn apply_filter(
    dataset: &Dataset,
    filter_columns: &[String],
    criterion: &FilterCriterion,
) -> Result<Vec<usize>, FilterError> {
    match criterion.mode {
        FilterMode::Substring => Ok(substring_matches(
            dataset,
            filter_columns,
            &criterion.pattern,
        )),
        FilterMode::Regex => {
            let regex =
                Regex::new(&criterion.pattern).map_err(|e| FilterError::InvalidRegex {
                    pattern: criterion.pattern.clone(),
                    reason: e.to_string(),
                })?;
            Ok(regex_matches(dataset, filter_columns, &regex))
        }
    }
}

fn substring_matches(dataset: &Dataset, filter_columns: &[String], pattern: &str) -> Vec<usize> {
    if pattern.is_empty() {
        return (0..dataset.len()).collect();
    }

    let pattern_lower = pattern.to_lowercase();
    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            filter_columns
                .iter()
                .any(|col| row.get(col).to_lowercase().contains(&pattern_lower))
        })
        .map(|(idx, _)| idx)
        .collect()
}

fn regex_matches(dataset: &Dataset, filter_columns: &[String], regex: &Regex) -> Vec<usize> {
    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| filter_columns.iter().any(|col| regex.is_match(row.get(col))))
        .map(|(idx, _)| idx)
        .collect()
}

// ===== Tests =====

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
