//! Outreach record collection over the tabular backend.

use hashbrown::HashSet;

use crate::{
    backend::{BackendError, TabularBackend},
    entry::{OutreachEntry, normalize_email},
    types::{ColIx, RowIx},
};

/// Column holding the submitter name (column B). Occupancy is judged on this
/// column: a blank name cell marks the row as reusable.
pub const NAME_COL: ColIx = 2;
/// Column holding the client email (column C).
pub const EMAIL_COL: ColIx = 3;
/// Column holding the reference note (column F). Columns A, D, and E are
/// outside this core and preserved on writes.
pub const REFERENCE_COL: ColIx = 6;

/// First row eligible to hold an entry; row 1 is the header.
pub const FIRST_DATA_ROW: RowIx = 2;

const HEADER_ROW: RowIx = 1;

/// Failure surfaced by a record or settings store operation.
#[derive(Debug)]
pub enum StoreError {
    /// The backend could not complete a read or write. Not retried; a failed
    /// `save` may have partially applied, so callers re-check before retrying.
    Unavailable(BackendError),
}

impl From<BackendError> for StoreError {
    fn from(value: BackendError) -> Self {
        Self::Unavailable(value)
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Owns the outreach-entry collection: duplicate lookup, slot selection, and
/// entry persistence with the fixed field-to-column mapping.
///
/// The mapping from logical fields to physical columns lives here and nowhere
/// else.
#[derive(Debug, Clone)]
pub struct RecordStore {
    area: String,
}

impl RecordStore {
    /// Creates a store bound to the named data area.
    pub fn new(area: impl Into<String>) -> Self {
        Self { area: area.into() }
    }

    /// Name of the data area this store writes to.
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Ensures the data area exists and carries a header row.
    ///
    /// An empty area gets the header written so row 1 stays reserved and the
    /// first entry lands on row 2.
    pub fn open(&self, backend: &mut dyn TabularBackend) -> StoreResult<()> {
        backend.ensure_area(&self.area)?;
        if backend.read_all(&self.area)?.is_empty() {
            let mut header = vec![String::new(); REFERENCE_COL];
            header[NAME_COL - 1] = "Submitter Name".to_string();
            header[EMAIL_COL - 1] = "Client Email".to_string();
            header[REFERENCE_COL - 1] = "Reference".to_string();
            backend.append_row(&self.area, &header)?;
        }
        Ok(())
    }

    /// Returns true when `email` is already recorded, comparing trimmed and
    /// lower-cased values. Blank cells are ignored.
    ///
    /// Full O(n) column scan; the membership set is rebuilt from the backend
    /// on every call so no staleness survives across submissions.
    pub fn exists(&self, backend: &dyn TabularBackend, email: &str) -> StoreResult<bool> {
        let candidate = normalize_email(email);
        if candidate.is_empty() {
            return Ok(false);
        }
        let recorded: HashSet<String> = backend
            .read_column(&self.area, EMAIL_COL)?
            .iter()
            .map(|value| normalize_email(value))
            .filter(|value| !value.is_empty())
            .collect();
        Ok(recorded.contains(&candidate))
    }

    /// Row the next entry should occupy: the topmost data row whose name cell
    /// is blank, else one past the last row.
    ///
    /// Blank rows exist when a human editor clears an entry in the shared
    /// store; they are backfilled rather than left as permanent gaps.
    pub fn find_insertion_slot(&self, backend: &dyn TabularBackend) -> StoreResult<RowIx> {
        let names = backend.read_column(&self.area, NAME_COL)?;
        Ok(slot_from_names(&names))
    }

    /// Persists `entry` into its slot and returns the row written.
    ///
    /// The full target row is buffered locally (preserving columns outside the
    /// core's mapping) and written with a single row-level call, so a failure
    /// never interleaves with a partially mapped entry. Callers must have seen
    /// [`RecordStore::exists`] return false for this email in the same attempt.
    pub fn save(&self, backend: &mut dyn TabularBackend, entry: &OutreachEntry) -> StoreResult<RowIx> {
        let names = backend.read_column(&self.area, NAME_COL)?;
        let slot = slot_from_names(&names);
        let mut extent = names.len();

        let mut cells = if slot <= extent {
            backend.read_row(&self.area, slot)?
        } else {
            Vec::new()
        };
        if cells.len() < REFERENCE_COL {
            cells.resize(REFERENCE_COL, String::new());
        }
        cells[NAME_COL - 1] = entry.submitter_name.clone();
        cells[EMAIL_COL - 1] = entry.client_email.clone();
        cells[REFERENCE_COL - 1] = entry.reference.clone();

        if slot <= extent {
            backend.write_row(&self.area, slot, &cells)?;
        } else {
            // Keeps row 1 reserved even when the area was never bootstrapped.
            while extent + 1 < slot {
                backend.append_row(&self.area, &[])?;
                extent += 1;
            }
            backend.append_row(&self.area, &cells)?;
        }
        Ok(slot)
    }
}

fn slot_from_names(names: &[String]) -> RowIx {
    for (ix, value) in names.iter().enumerate() {
        let row = ix + 1;
        if row == HEADER_ROW {
            continue;
        }
        if value.trim().is_empty() {
            return row;
        }
    }
    (names.len() + 1).max(FIRST_DATA_ROW)
}
