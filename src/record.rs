use serde::Serialize;

use crate::{
    blob::{Blob, SourceFile},
    id::RecordId,
};

/// The folder bucket every new record lands in.
///
/// Reserved extension point: the tag is stored and serialized, but no
/// grouping or filtering is built on it.
pub const DEFAULT_FOLDER: &str = "default";

/// One tracked upload and its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// Unique across the registry for the record's lifetime.
    id: RecordId,
    /// Mutable display name; never empty (renames enforce it).
    name: String,
    /// Byte count captured from the source at upload time.
    size: u64,
    /// The registry exclusively owns this handle until the record is
    /// deleted.
    #[serde(skip)]
    content: Blob,
    pinned: bool,
    shared: bool,
    folder: String,
}

impl FileRecord {
    pub(crate) fn new(source: SourceFile) -> Self {
        FileRecord {
            id: RecordId::fresh(),
            name: source.name,
            size: source.size,
            content: source.content,
            pinned: false,
            shared: false,
            folder: DEFAULT_FOLDER.to_string(),
        }
    }

    /// Copy of this record under a fresh id. The payload is re-referenced,
    /// not copied.
    pub(crate) fn duplicated(&self) -> Self {
        FileRecord {
            id: RecordId::fresh(),
            name: self.name.clone(),
            size: self.size,
            content: self.content.clone(),
            pinned: self.pinned,
            shared: self.shared,
            folder: self.folder.clone(),
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn content(&self) -> &Blob {
        &self.content
    }

    pub fn pinned(&self) -> bool {
        self.pinned
    }

    pub fn shared(&self) -> bool {
        self.shared
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn toggle_pinned(&mut self) {
        self.pinned = !self.pinned;
    }

    pub(crate) fn toggle_shared(&mut self) {
        self.shared = !self.shared;
    }
}
