//! Outreach entry records, form drafts, and the submitter-name setting.

use serde::{Deserialize, Serialize};

/// Fully materialized outreach contact entry.
///
/// Created by the orchestrator once a draft passes validation and the
/// duplicate check; never updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachEntry {
    /// Submitter display name, trimmed.
    pub submitter_name: String,
    /// Client contact email, trimmed. Unique across all entries under
    /// [`normalize_email`] comparison.
    pub client_email: String,
    /// Free-text reference note (Instagram handle, YouTube channel, etc.).
    /// Stored verbatim; may be empty.
    pub reference: String,
    /// Creation timestamp in milliseconds since epoch. Held on the record
    /// only; the tabular store's date columns are outside this core.
    pub submitted_at_ms: u64,
}

/// Submission payload as received from the form layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryDraft {
    /// Submitter display name as typed.
    pub submitter_name: String,
    /// Client contact email as typed.
    pub client_email: String,
    /// Free-text reference note as typed.
    pub reference: String,
}

/// Singleton setting carried across sessions: the current submitter name.
///
/// Passed into and returned from each submission attempt; there is no
/// process-wide cache behind it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Current submitter display name. May be empty.
    pub submitter_name: String,
}

/// Normalizes an email for duplicate comparison: trimmed and lower-cased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
