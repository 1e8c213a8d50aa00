//! Databricks SQL executor over the Statement Execution REST API.
//!
//! A statement is submitted to `POST /api/2.0/sql/statements` with inline
//! JSON-array results. While it is pending the statement is polled; once it
//! succeeds the first result chunk comes with the statement and further
//! chunks are followed through `next_chunk_internal_link`.
//!
//! Decoding is kept separate from HTTP so it can be tested on canned
//! responses.

use super::{QueryError, QueryExecutor, QueryResult};
use crate::config::Profile;
use crate::model::Row;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Rendering of SQL NULL cells.
pub const NULL_TEXT: &str = "NULL";

const STATEMENTS_PATH: &str = "/api/2.0/sql/statements";

/// Server-side wait before the first response; the rest is polling.
const WAIT_TIMEOUT: &str = "10s";

const POLL_INTERVAL: Duration = Duration::from_millis(500);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ===== Wire types =====

/// Lifecycle state of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementState {
    /// Queued.
    Pending,
    /// Executing.
    Running,
    /// Finished; results available.
    Succeeded,
    /// Finished with an error.
    Failed,
    /// Cancelled by a user or the service.
    Canceled,
    /// Results were closed or expired.
    Closed,
    /// A state this client does not know.
    #[serde(other)]
    Unknown,
}

impl StatementState {
    /// Whether the statement is still in progress.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }

    /// Name as used by the service.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
            Self::Closed => "CLOSED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct StatementResponse {
    statement_id: String,
    status: StatementStatus,
    #[serde(default)]
    manifest: Option<Manifest>,
    #[serde(default)]
    result: Option<ResultChunk>,
}

#[derive(Debug, Clone, Deserialize)]
struct StatementStatus {
    state: StatementState,
    #[serde(default)]
    error: Option<ServiceError>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServiceError {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Manifest {
    schema: Schema,
}

#[derive(Debug, Clone, Deserialize)]
struct Schema {
    #[serde(default)]
    columns: Vec<ColumnSchema>,
}

#[derive(Debug, Clone, Deserialize)]
struct ColumnSchema {
    name: String,
    #[serde(default)]
    position: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ResultChunk {
    #[serde(default)]
    data_array: Option<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    next_chunk_internal_link: Option<String>,
}

// ===== Decoding =====

/// Where a statement stands after one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementProgress {
    /// Still running; poll again with this id.
    Pending {
        /// Statement id.
        statement_id: String,
    },
    /// Finished with its first chunk decoded.
    Done {
        /// Rows decoded so far.
        result: QueryResult,
        /// Link to the next chunk, if any.
        next_chunk: Option<String>,
    },
}

fn decode<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T, QueryError> {
    serde_json::from_value(value).map_err(|e| QueryError::Decode {
        reason: e.to_string(),
    })
}

/// Decode a statement response.
///
/// Failed, cancelled or closed statements become [`QueryError::Failed`]
/// carrying the service's message.
pub fn decode_statement(value: Value) -> Result<StatementProgress, QueryError> {
    let response: StatementResponse = decode(value)?;
    let state = response.status.state;

    if state.is_pending() {
        return Ok(StatementProgress::Pending {
            statement_id: response.statement_id,
        });
    }

    if state != StatementState::Succeeded {
        let message = response
            .status
            .error
            .map(|e| match (e.error_code, e.message) {
                (Some(code), Some(message)) => format!("[{code}] {message}"),
                (None, Some(message)) => message,
                (Some(code), None) => code,
                (None, None) => "no error message".to_string(),
            })
            .unwrap_or_else(|| "no error message".to_string());
        return Err(QueryError::Failed {
            state: state.as_str().to_string(),
            message,
        });
    }

    let manifest = response.manifest.ok_or_else(|| QueryError::Decode {
        reason: "succeeded statement has no manifest".to_string(),
    })?;
    let columns = column_names(manifest.schema.columns);
    let chunk = response.result.unwrap_or_default();
    let rows = rows_from_data(&columns, chunk.data_array.unwrap_or_default())?;

    Ok(StatementProgress::Done {
        result: QueryResult { columns, rows },
        next_chunk: chunk.next_chunk_internal_link,
    })
}

/// Decode a follow-up result chunk into rows and the link to the next one.
pub fn decode_chunk(
    columns: &[String],
    value: Value,
) -> Result<(Vec<Row>, Option<String>), QueryError> {
    let chunk: ResultChunk = decode(value)?;
    let rows = rows_from_data(columns, chunk.data_array.unwrap_or_default())?;
    Ok((rows, chunk.next_chunk_internal_link))
}

/// Column names ordered by their schema position.
fn column_names(mut columns: Vec<ColumnSchema>) -> Vec<String> {
    columns.sort_by_key(|c| c.position.unwrap_or(usize::MAX));
    columns.into_iter().map(|c| c.name).collect()
}

fn rows_from_data(
    columns: &[String],
    data: Vec<Vec<Option<String>>>,
) -> Result<Vec<Row>, QueryError> {
    data.into_iter()
        .enumerate()
        .map(|(i, values)| {
            if values.len() != columns.len() {
                return Err(QueryError::Decode {
                    reason: format!(
                        "row {} has {} values for {} columns",
                        i,
                        values.len(),
                        columns.len()
                    ),
                });
            }
            Ok(Row::from_pairs(columns.iter().zip(values).map(|(name, value)| {
                (name.clone(), value.unwrap_or_else(|| NULL_TEXT.to_string()))
            })))
        })
        .collect()
}

/// Warehouse id: the last non-empty segment of `http_path`,
/// e.g. `/sql/1.0/warehouses/abc123` → `abc123`.
pub fn warehouse_id(http_path: &str) -> Result<&str, QueryError> {
    http_path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .ok_or_else(|| QueryError::Settings {
            reason: format!("http_path `{http_path}` has no warehouse id"),
        })
}

/// `https://<host>` without a trailing slash. A scheme already present is kept.
pub fn base_url(server_hostname: &str) -> String {
    let host = server_hostname.trim().trim_end_matches('/');
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

/// Service message from an error body, falling back to the raw text.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
    match message {
        Some(message) => format!("{status}: {message}"),
        None if body.trim().is_empty() => status.to_string(),
        None => format!("{status}: {}", body.trim()),
    }
}

// ===== Executor =====

/// Runs statements on a Databricks SQL warehouse.
#[derive(Clone)]
pub struct DatabricksExecutor {
    client: Client,
    base_url: String,
    warehouse_id: String,
    access_token: String,
}

impl fmt::Debug for DatabricksExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabricksExecutor")
            .field("base_url", &self.base_url)
            .field("warehouse_id", &self.warehouse_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl DatabricksExecutor {
    /// Executor for the connection described by `profile`.
    pub fn new(profile: &Profile) -> Result<Self, QueryError> {
        let warehouse_id = warehouse_id(&profile.http_path)?.to_string();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(http_error)?;

        Ok(Self {
            client,
            base_url: base_url(&profile.server_hostname),
            warehouse_id,
            access_token: profile.access_token.clone(),
        })
    }

    fn send(&self, request: RequestBuilder) -> Result<Value, QueryError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(QueryError::Api {
                message: error_message(status, &body),
            });
        }
        response.json().map_err(|e| QueryError::Decode {
            reason: e.to_string(),
        })
    }

    fn submit(&self, sql: &str) -> Result<Value, QueryError> {
        let body = json!({
            "statement": sql,
            "warehouse_id": self.warehouse_id,
            "wait_timeout": WAIT_TIMEOUT,
            "on_wait_timeout": "CONTINUE",
            "disposition": "INLINE",
            "format": "JSON_ARRAY",
        });
        self.send(
            self.client
                .post(format!("{}{}", self.base_url, STATEMENTS_PATH))
                .json(&body),
        )
    }

    fn poll(&self, statement_id: &str) -> Result<Value, QueryError> {
        self.send(
            self.client
                .get(format!("{}{}/{}", self.base_url, STATEMENTS_PATH, statement_id)),
        )
    }

    fn fetch_chunk(&self, link: &str) -> Result<Value, QueryError> {
        self.send(self.client.get(format!("{}{}", self.base_url, link)))
    }
}

impl QueryExecutor for DatabricksExecutor {
    fn run_query(&self, sql: &str) -> Result<QueryResult, QueryError> {
        info!(warehouse = %self.warehouse_id, "Submitting statement");
        let mut progress = decode_statement(self.submit(sql)?)?;

        let (mut result, mut next_chunk) = loop {
            match progress {
                StatementProgress::Pending { statement_id } => {
                    debug!(%statement_id, "Statement pending");
                    thread::sleep(POLL_INTERVAL);
                    progress = decode_statement(self.poll(&statement_id)?)?;
                }
                StatementProgress::Done { result, next_chunk } => break (result, next_chunk),
            }
        };

        while let Some(link) = next_chunk {
            debug!(%link, rows = result.rows.len(), "Fetching next chunk");
            let (rows, next) = decode_chunk(&result.columns, self.fetch_chunk(&link)?)?;
            result.rows.extend(rows);
            next_chunk = next;
        }

        info!(
            rows = result.rows.len(),
            columns = result.columns.len(),
            "Statement succeeded"
        );
        Ok(result)
    }
}

fn http_error(e: reqwest::Error) -> QueryError {
    QueryError::Http {
        reason: e.to_string(),
    }
}

#[cfg(test)]
#[path = "databricks_tests.rs"]
mod tests;
