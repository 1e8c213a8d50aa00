//! Row store: the immutable result set of one browsing session.
//!
//! A [`Dataset`] can only be built through its smart constructor, which
//! refuses an empty row sequence. The browser takes a `Dataset` by value, so
//! a zero-row browser cannot be constructed at all.

use std::collections::HashMap;
use thiserror::Error;

/// Errors raised when assembling a [`Dataset`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// The query returned no rows; the caller prints a "no data" message instead.
    #[error("No data to display.")]
    NoRows,
}

// ===== Row =====

/// One record of the result set: column name to cell text.
///
/// Immutable once built. Looking up a column the row does not carry yields
/// the empty string, matching how a missing map entry renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row(HashMap<String, String>);

impl Row {
    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Cell text for `column`, or `""` when the row has no such column.
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map(String::as_str).unwrap_or("")
    }

    /// Number of cells in this row.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for Row {
    fn from(cells: HashMap<String, String>) -> Self {
        Self(cells)
    }
}

// ===== Dataset =====

/// The full result set: rows plus the canonical column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Smart constructor: rejects an empty row sequence.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::NoRows);
        }
        Ok(Self { columns, rows })
    }

    /// Column names in canonical order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in load order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row at `index`, if any.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows. Never zero.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
