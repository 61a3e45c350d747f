//! Singleton submitter-name setting in its own area.

use crate::{
    backend::TabularBackend,
    entry::Settings,
    types::{ColIx, RowIx},
};

use super::records::StoreResult;

const LABEL_ROW: RowIx = 1;
const VALUE_ROW: RowIx = 2;
const VALUE_COL: ColIx = 1;
const LABEL: &str = "Submitter Name";

/// Reads and writes the single named scalar this system persists: the
/// submitter display name.
///
/// Layout contract: single column, row 1 label, row 2 value. The area is
/// created lazily on first use and overwritten wholesale on every save.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    area: String,
}

impl SettingsStore {
    /// Creates a store bound to the named settings area.
    pub fn new(area: impl Into<String>) -> Self {
        Self { area: area.into() }
    }

    /// Name of the settings area this store writes to.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Loads the current setting, creating the area if absent.
    ///
    /// A missing area or missing value reads as the empty string.
    pub fn load(&self, backend: &mut dyn TabularBackend) -> StoreResult<Settings> {
        backend.ensure_area(&self.area)?;
        let column = backend.read_column(&self.area, VALUE_COL)?;
        let submitter_name = column
            .get(VALUE_ROW - 1)
            .map(|value| value.trim().to_string())
            .unwrap_or_default();
        Ok(Settings { submitter_name })
    }

    /// Overwrites the setting with `name` (trimmed) and returns the stored
    /// value. The prior value is discarded, never appended to.
    pub fn save(&self, backend: &mut dyn TabularBackend, name: &str) -> StoreResult<Settings> {
        backend.ensure_area(&self.area)?;
        let trimmed = name.trim();
        backend.write_row(&self.area, LABEL_ROW, &[LABEL.to_string()])?;
        backend.write_row(&self.area, VALUE_ROW, &[trimmed.to_string()])?;
        Ok(Settings {
            submitter_name: trimmed.to_string(),
        })
    }
}
