//! # stashlib
//!
//! `stashlib` is the core of a session-scoped file manager: an in-memory
//! [`Registry`] of uploaded file records and a pure [`project`] function that
//! turns the registry plus the active search term into the displayed,
//! filtered row list.
//!
//! All state lives in one process for the duration of a session; there is no
//! persistence and no network. External concerns sit behind traits:
//! [`FileSource`] supplies raw blobs, [`DisplayDriver`] renders projections
//! and notices, and [`PlatformServices`] provides the native open, download
//! and share affordances.
//!
//! ## Examples
//! ```
//! use stashlib::{Registry, SourceFile, project};
//!
//! let mut registry = Registry::new();
//! registry.ingest(vec![
//!     SourceFile::from_bytes("Report.pdf", b"%PDF-1.4".to_vec()),
//!     SourceFile::from_bytes("notes.txt", b"todo".to_vec()),
//! ]);
//!
//! let rows = project(registry.records(), "pdf");
//! let visible: Vec<_> = rows.iter().filter(|r| r.visible).collect();
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].name, "Report.pdf");
//! ```

mod blob;
mod errors;
mod id;
mod platform;
mod record;
mod registry;
mod session;
mod view;

pub use blob::{Blob, DiskSource, FileSource, MemorySource, SourceFile};
pub use errors::{Result, StashError};
pub use id::RecordId;
pub use platform::{LocalPlatform, PlatformServices, ShareOutcome};
pub use record::{FileRecord, DEFAULT_FOLDER};
pub use registry::Registry;
pub use session::{Command, DisplayDriver, Notice, Session};
pub use view::{format_size, project, rows_to_json, Action, ActionSet, ViewRow};
