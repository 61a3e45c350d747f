//! Shared primitive indices and field identifiers.

use serde::{Deserialize, Serialize};

/// One-based row position within a tabular area. Row 1 of the data area is
/// reserved for the header.
pub type RowIx = usize;
/// One-based column position within a tabular area.
pub type ColIx = usize;

/// Logical entry field, used to name missing fields in validation rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// The submitter's display name.
    SubmitterName,
    /// The client contact email.
    ClientEmail,
    /// Free-text reference note.
    Reference,
}
