//! In-memory tabular grid.

use hashbrown::HashMap;

use crate::types::{ColIx, RowIx};

use super::{BackendError, BackendResult, TabularBackend};

/// In-process [`TabularBackend`] holding every area as a row list.
///
/// Used by examples and tests; semantics match [`super::sqlite::SqliteGrid`].
#[derive(Debug, Default)]
pub struct MemoryGrid {
    areas: HashMap<String, Vec<Vec<String>>>,
}

impl MemoryGrid {
    /// Creates an empty grid with no areas.
    pub fn new() -> Self {
        Self::default()
    }

    fn area(&self, area: &str) -> BackendResult<&Vec<Vec<String>>> {
        self.areas
            .get(area)
            .ok_or_else(|| BackendError::AreaNotFound(area.to_string()))
    }

    fn area_mut(&mut self, area: &str) -> BackendResult<&mut Vec<Vec<String>>> {
        self.areas
            .get_mut(area)
            .ok_or_else(|| BackendError::AreaNotFound(area.to_string()))
    }
}

impl TabularBackend for MemoryGrid {
    fn ensure_area(&mut self, area: &str) -> BackendResult<()> {
        self.areas.entry(area.to_string()).or_default();
        Ok(())
    }

    fn read_column(&self, area: &str, col: ColIx) -> BackendResult<Vec<String>> {
        let rows = self.area(area)?;
        Ok(rows
            .iter()
            .map(|cells| cells.get(col - 1).cloned().unwrap_or_default())
            .collect())
    }

    fn read_row(&self, area: &str, row: RowIx) -> BackendResult<Vec<String>> {
        let rows = self.area(area)?;
        Ok(rows.get(row - 1).cloned().unwrap_or_default())
    }

    fn read_all(&self, area: &str) -> BackendResult<Vec<Vec<String>>> {
        Ok(self.area(area)?.clone())
    }

    fn write_cell(&mut self, area: &str, row: RowIx, col: ColIx, value: &str) -> BackendResult<()> {
        let rows = self.area_mut(area)?;
        if rows.len() < row {
            rows.resize(row, Vec::new());
        }
        let cells = &mut rows[row - 1];
        if cells.len() < col {
            cells.resize(col, String::new());
        }
        cells[col - 1] = value.to_string();
        Ok(())
    }

    fn write_row(&mut self, area: &str, row: RowIx, values: &[String]) -> BackendResult<()> {
        let rows = self.area_mut(area)?;
        if rows.len() < row {
            rows.resize(row, Vec::new());
        }
        rows[row - 1] = values.to_vec();
        Ok(())
    }

    fn append_row(&mut self, area: &str, values: &[String]) -> BackendResult<()> {
        self.area_mut(area)?.push(values.to_vec());
        Ok(())
    }
}
