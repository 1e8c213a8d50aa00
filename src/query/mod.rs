//! Query execution.
//!
//! A [`QueryExecutor`] runs SQL text to completion and hands back the whole
//! result as one [`QueryResult`]. The browser only ever sees a finished
//! result; [`run_with_progress`] shows a spinner while a worker thread waits.

pub mod databricks;
pub mod progress;

pub use databricks::DatabricksExecutor;
pub use progress::run_with_progress;

use crate::model::{Dataset, DatasetError, Row};
use thiserror::Error;

/// Errors from running a query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Transport failure: DNS, TLS, connection reset, timeout.
    #[error("HTTP request failed: {reason}")]
    Http {
        /// Underlying error text.
        reason: String,
    },

    /// The service rejected a request.
    #[error("{message}")]
    Api {
        /// Message returned by the service.
        message: String,
    },

    /// The statement ended in a non-success state.
    #[error("Statement {state}: {message}")]
    Failed {
        /// Terminal state name, e.g. `FAILED`.
        state: String,
        /// Error message reported for the statement.
        message: String,
    },

    /// A response did not have the expected shape.
    #[error("Unexpected response: {reason}")]
    Decode {
        /// What was wrong.
        reason: String,
    },

    /// The connection settings cannot be used.
    #[error("Invalid connection settings: {reason}")]
    Settings {
        /// What was wrong.
        reason: String,
    },

    /// The worker thread ended without delivering a result.
    #[error("Query worker stopped without a result")]
    WorkerLost,
}

/// Complete result of a query: column names in result order plus every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Column names in the order the query returned them.
    pub columns: Vec<String>,
    /// Rows, each mapping column name to display text.
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Whether the query returned no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert into a browsable dataset. Fails with
    /// [`DatasetError::NoRows`] for an empty result.
    pub fn into_dataset(self) -> Result<Dataset, DatasetError> {
        Dataset::new(self.columns, self.rows)
    }
}

/// Something that can run SQL text to completion.
pub trait QueryExecutor {
    /// Run `sql` and return the complete result.
    fn run_query(&self, sql: &str) -> Result<QueryResult, QueryError>;
}
