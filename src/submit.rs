//! Submission orchestration: validate, check duplicate, persist, refresh name.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    backend::{BackendError, TabularBackend},
    core::{
        records::{RecordStore, StoreError, StoreResult},
        settings::SettingsStore,
    },
    entry::{EntryDraft, OutreachEntry, Settings},
    types::{Field, RowIx},
};

/// Terminal rejection for one submission attempt.
#[derive(Debug)]
pub enum SubmitError {
    /// A required field was blank. Names every missing field.
    Validation {
        /// Fields that were missing or whitespace-only.
        missing: Vec<Field>,
    },
    /// The candidate email is already recorded (case-insensitive, trimmed).
    /// Nothing was written.
    DuplicateEmail {
        /// The rejected email as submitted.
        email: String,
    },
    /// The backend could not complete a read or write. Propagated, not
    /// retried.
    Unavailable(BackendError),
}

impl From<StoreError> for SubmitError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable(err) => Self::Unavailable(err),
        }
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Row the entry was written to.
    pub row: RowIx,
    /// The persisted entry.
    pub entry: OutreachEntry,
    /// True when the submitter-name setting was refreshed by this attempt.
    pub name_saved: bool,
}

/// Application-level sequencing over the record and settings stores.
///
/// One submission runs to completion before the next is accepted; there is no
/// retry and no isolation against concurrent writers of the shared store.
#[derive(Debug, Clone)]
pub struct Submitter {
    records: RecordStore,
    settings: SettingsStore,
}

impl Submitter {
    /// Creates an orchestrator over the two stores.
    pub fn new(records: RecordStore, settings: SettingsStore) -> Self {
        Self { records, settings }
    }

    /// Opens the data area and loads the current submitter-name setting.
    pub fn open(&self, backend: &mut dyn TabularBackend) -> StoreResult<Settings> {
        self.records.open(backend)?;
        self.settings.load(backend)
    }

    /// Runs one submission attempt to completion.
    ///
    /// Validates the draft, rejects duplicates, persists the entry, and
    /// refreshes the stored submitter name when it changed. Returns the
    /// receipt together with the settings value to carry into the next
    /// attempt. The backend is not touched until validation passes.
    pub fn submit(
        &self,
        backend: &mut dyn TabularBackend,
        draft: EntryDraft,
        current: &Settings,
    ) -> Result<(SubmitReceipt, Settings), SubmitError> {
        let mut missing = Vec::new();
        if draft.submitter_name.trim().is_empty() {
            missing.push(Field::SubmitterName);
        }
        if draft.client_email.trim().is_empty() {
            missing.push(Field::ClientEmail);
        }
        if !missing.is_empty() {
            return Err(SubmitError::Validation { missing });
        }

        if self.records.exists(backend, &draft.client_email)? {
            return Err(SubmitError::DuplicateEmail {
                email: draft.client_email,
            });
        }

        let entry = OutreachEntry {
            submitter_name: draft.submitter_name.trim().to_string(),
            client_email: draft.client_email.trim().to_string(),
            reference: draft.reference,
            submitted_at_ms: now_ms(),
        };
        let row = self.records.save(backend, &entry)?;

        let mut settings = current.clone();
        let mut name_saved = false;
        if entry.submitter_name != current.submitter_name {
            settings = self.settings.save(backend, &entry.submitter_name)?;
            name_saved = true;
        }

        Ok((
            SubmitReceipt {
                row,
                entry,
                name_saved,
            },
            settings,
        ))
    }

    /// Handles a name-update request arriving independently of a submission.
    pub fn update_name(
        &self,
        backend: &mut dyn TabularBackend,
        name: &str,
    ) -> Result<Settings, SubmitError> {
        Ok(self.settings.save(backend, name)?)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
