//! Runtime event stream payloads.

use crate::types::RowIx;

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutreachEvent {
    /// A new entry was written to the data area.
    EntryRecorded {
        /// Row the entry occupies.
        row: RowIx,
    },
    /// The submitter-name setting was overwritten.
    NameSaved,
}
