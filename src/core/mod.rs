//! Record and settings stores over the tabular backend.

/// Outreach record collection: duplicate lookup, slot selection, persistence.
pub mod records;
/// Singleton submitter-name setting.
pub mod settings;
