//! Tabular backend contract and implementations.

/// In-memory grid used by tests and examples.
pub mod memory;
/// SQLite-backed grid.
pub mod sqlite;

use crate::types::{ColIx, RowIx};

/// Failure surfaced by a [`TabularBackend`] call.
#[derive(Debug)]
pub enum BackendError {
    /// The named area does not exist. Recoverable via
    /// [`TabularBackend::ensure_area`].
    AreaNotFound(String),
    /// The collaborator rejected the call under rate limiting. Retryable by
    /// the caller; the core never retries on its own.
    RateLimited,
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// Row payload encode/decode failure.
    Serde(serde_json::Error),
    /// Any other collaborator failure.
    Message(String),
}

impl From<rusqlite::Error> for BackendError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl BackendError {
    /// True when the failure is worth retrying as-is (rate limiting).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// Result alias for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// Row/column-indexed persistent table, addressed by named area.
///
/// All indices are one-based. Reads on a missing area fail with
/// [`BackendError::AreaNotFound`]; [`TabularBackend::ensure_area`] is the
/// creation path. Writes overwrite, never insert; `append_row` adds one row
/// past the current extent.
pub trait TabularBackend: Send {
    /// Creates the named area if missing.
    fn ensure_area(&mut self, area: &str) -> BackendResult<()>;

    /// Ordered values of one column, top row first: one value per existing
    /// row, blank where the cell is unset.
    fn read_column(&self, area: &str, col: ColIx) -> BackendResult<Vec<String>>;

    /// Cell values of one row. An unset row reads as empty.
    fn read_row(&self, area: &str, row: RowIx) -> BackendResult<Vec<String>>;

    /// Every row of the area, top row first, gaps read as empty rows.
    fn read_all(&self, area: &str) -> BackendResult<Vec<Vec<String>>>;

    /// Overwrites a single cell, extending the row as needed.
    fn write_cell(&mut self, area: &str, row: RowIx, col: ColIx, value: &str) -> BackendResult<()>;

    /// Overwrites a whole row.
    fn write_row(&mut self, area: &str, row: RowIx, values: &[String]) -> BackendResult<()>;

    /// Adds a row immediately past the current extent.
    fn append_row(&mut self, area: &str, values: &[String]) -> BackendResult<()>;
}
