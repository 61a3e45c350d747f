//! SQLite-backed tabular grid.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::types::{ColIx, RowIx};

use super::{BackendError, BackendResult, TabularBackend};

/// Version number for serialized row payloads.
const ROW_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RowEnvelope {
    format_version: u16,
    cells: Vec<String>,
}

/// SQLite implementation of [`TabularBackend`].
///
/// Each area row is one `area_rows` record whose payload is a versioned JSON
/// envelope of cell strings. Unwritten rows below the extent read back as
/// blanks, matching spreadsheet semantics.
pub struct SqliteGrid {
    conn: Connection,
}

impl SqliteGrid {
    /// Opens or creates a grid database at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> BackendResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory grid database.
    pub fn open_in_memory() -> BackendResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> BackendResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    fn area_id(&self, area: &str) -> BackendResult<Option<i64>> {
        let id = self
            .conn
            .query_row("SELECT id FROM areas WHERE name = ?1", params![area], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(id)
    }

    fn require_area(&self, area: &str) -> BackendResult<i64> {
        self.area_id(area)?
            .ok_or_else(|| BackendError::AreaNotFound(area.to_string()))
    }

    fn max_row(&self, area_id: i64) -> BackendResult<RowIx> {
        let max: Option<i64> = self.conn.query_row(
            "SELECT MAX(row_ix) FROM area_rows WHERE area_id = ?1",
            params![area_id],
            |row| row.get(0),
        )?;
        Ok(max.unwrap_or(0) as RowIx)
    }

    fn load_rows(&self, area_id: i64) -> BackendResult<Vec<(RowIx, Vec<String>)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT row_ix, payload FROM area_rows WHERE area_id = ?1 ORDER BY row_ix ASC")?;

        let rows = stmt.query_map(params![area_id], |row| {
            let ix: i64 = row.get(0)?;
            let payload: Vec<u8> = row.get(1)?;
            Ok((ix as RowIx, payload))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (ix, payload) = row?;
            out.push((ix, decode_row_payload(&payload)?));
        }
        Ok(out)
    }

    fn load_row(&self, area_id: i64, row: RowIx) -> BackendResult<Option<Vec<String>>> {
        let payload: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT payload FROM area_rows WHERE area_id = ?1 AND row_ix = ?2",
                params![area_id, row as i64],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(None);
        };
        Ok(Some(decode_row_payload(&payload)?))
    }

    fn upsert_row(&mut self, area_id: i64, row: RowIx, cells: Vec<String>) -> BackendResult<()> {
        let payload = serde_json::to_vec(&RowEnvelope {
            format_version: ROW_FORMAT_VERSION,
            cells,
        })?;
        self.conn.execute(
            "INSERT INTO area_rows(area_id, row_ix, payload) VALUES (?1, ?2, ?3)
             ON CONFLICT(area_id, row_ix) DO UPDATE SET payload = excluded.payload",
            params![area_id, row as i64, payload],
        )?;
        Ok(())
    }
}

impl TabularBackend for SqliteGrid {
    fn ensure_area(&mut self, area: &str) -> BackendResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO areas(name) VALUES (?1)",
            params![area],
        )?;
        Ok(())
    }

    fn read_column(&self, area: &str, col: ColIx) -> BackendResult<Vec<String>> {
        let area_id = self.require_area(area)?;
        let mut out = vec![String::new(); self.max_row(area_id)?];
        for (ix, cells) in self.load_rows(area_id)? {
            out[ix - 1] = cells.get(col - 1).cloned().unwrap_or_default();
        }
        Ok(out)
    }

    fn read_row(&self, area: &str, row: RowIx) -> BackendResult<Vec<String>> {
        let area_id = self.require_area(area)?;
        Ok(self.load_row(area_id, row)?.unwrap_or_default())
    }

    fn read_all(&self, area: &str) -> BackendResult<Vec<Vec<String>>> {
        let area_id = self.require_area(area)?;
        let mut out = vec![Vec::new(); self.max_row(area_id)?];
        for (ix, cells) in self.load_rows(area_id)? {
            out[ix - 1] = cells;
        }
        Ok(out)
    }

    fn write_cell(&mut self, area: &str, row: RowIx, col: ColIx, value: &str) -> BackendResult<()> {
        let area_id = self.require_area(area)?;
        let mut cells = self.load_row(area_id, row)?.unwrap_or_default();
        if cells.len() < col {
            cells.resize(col, String::new());
        }
        cells[col - 1] = value.to_string();
        self.upsert_row(area_id, row, cells)
    }

    fn write_row(&mut self, area: &str, row: RowIx, values: &[String]) -> BackendResult<()> {
        let area_id = self.require_area(area)?;
        self.upsert_row(area_id, row, values.to_vec())
    }

    fn append_row(&mut self, area: &str, values: &[String]) -> BackendResult<()> {
        let area_id = self.require_area(area)?;
        let next = self.max_row(area_id)? + 1;
        self.upsert_row(area_id, next, values.to_vec())
    }
}

fn decode_row_payload(payload: &[u8]) -> BackendResult<Vec<String>> {
    let envelope: RowEnvelope = serde_json::from_slice(payload)?;
    if envelope.format_version != ROW_FORMAT_VERSION {
        return Err(BackendError::Message(format!(
            "unsupported row format version: {}",
            envelope.format_version
        )));
    }
    Ok(envelope.cells)
}
