//! Error types for the termquery application.
//!
//! Each concern owns its error enum (config loading, history cache, editor,
//! query execution, terminal). [`AppError`] is the top-level type the binary
//! deals with; every concern converts into it through `From`, so the whole
//! startup pipeline composes with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`]
//!   - [`ConfigError`] / [`ProfileError`] - config and profiles files
//!   - [`LoggingError`] - log file setup
//!   - [`HistoryError`] / [`EditorError`] - query history cache and editor call
//!   - [`QueryError`] - remote execution; fatal before the browser starts
//!   - [`TuiError`] - terminal I/O while browsing
//!
//! # Recovery Strategy
//!
//! Errors that originate inside the result browser never reach this type: an
//! uncompilable regex is absorbed by the browser state and the previous view
//! is kept. Everything listed here aborts the run with a message on stderr.

use crate::config::{ConfigError, ProfileError};
use crate::history::{EditorError, HistoryError};
use crate::logging::LoggingError;
use crate::query::QueryError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```
/// use termquery::model::AppError;
/// use termquery::query::QueryError;
///
/// let err: AppError = QueryError::Api {
///     message: "table not found".to_string(),
/// }
/// .into();
/// assert!(err.to_string().contains("table not found"));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Connection profile missing or incomplete.
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Log directory or subscriber could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Query history directory I/O failed.
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// The editor could not be started or exited unsuccessfully.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Query execution failed. Fatal: the browser is never constructed.
    #[error("Query failed: {0}")]
    Query(#[from] QueryError),

    /// Terminal setup, drawing or teardown failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] TuiError),

    /// Reading the query file failed.
    #[error("Failed to read query file: {0}")]
    Io(#[from] std::io::Error),
}
