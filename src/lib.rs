//! Outreach entry logging over a shared row/column tabular store.
//!
//! Entries (submitter name, client email, reference note) are persisted one
//! per row with a fixed column mapping, client emails are kept unique under
//! trimmed case-insensitive comparison, blanked-out rows are reused before
//! appending, and the current submitter name is carried across sessions in a
//! dedicated settings area of the same store.
//!
//! # Examples
//!
//! Synchronous usage with [`submit::Submitter`] over an in-memory grid:
//! ```
//! use outreachlog::{
//!     backend::memory::MemoryGrid,
//!     core::{records::RecordStore, settings::SettingsStore},
//!     entry::EntryDraft,
//!     submit::Submitter,
//! };
//!
//! let mut grid = MemoryGrid::new();
//! let submitter = Submitter::new(RecordStore::new("Outreach"), SettingsStore::new("Settings"));
//! let settings = submitter.open(&mut grid).expect("open");
//!
//! let (receipt, settings) = submitter
//!     .submit(
//!         &mut grid,
//!         EntryDraft {
//!             submitter_name: "Aisha".to_string(),
//!             client_email: "a@x.com".to_string(),
//!             reference: "IG @foo".to_string(),
//!         },
//!         &settings,
//!     )
//!     .expect("submit");
//! assert_eq!(receipt.row, 2);
//! assert_eq!(settings.submitter_name, "Aisha");
//! ```
//!
//! Runtime usage with the SQLite grid:
//! ```no_run
//! use outreachlog::{
//!     backend::sqlite::SqliteGrid,
//!     entry::EntryDraft,
//!     runtime::handle::{spawn_outreach, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let grid = SqliteGrid::open("outreach.db").expect("open grid");
//! let handle = spawn_outreach(Box::new(grid), RuntimeConfig::default());
//! let receipt = handle
//!     .submit(EntryDraft {
//!         submitter_name: "Aisha".to_string(),
//!         client_email: "a@x.com".to_string(),
//!         reference: String::new(),
//!     })
//!     .await
//!     .expect("submit");
//! assert_eq!(receipt.row, 2);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Tabular backend contract plus SQLite and in-memory grids.
pub mod backend;
/// Record and settings stores.
pub mod core;
/// Entry records, drafts, and the submitter-name setting.
pub mod entry;
/// Single-writer async runtime and event stream APIs.
pub mod runtime;
/// Submission orchestration.
pub mod submit;
/// Shared primitive types.
pub mod types;
