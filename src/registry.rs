use std::cmp::Ordering;

use crate::{
    blob::SourceFile,
    errors::{Result, StashError},
    id::RecordId,
    record::FileRecord,
};

/// The authoritative in-memory collection of records for one session.
///
/// The registry owns every record's payload handle for the record's
/// lifetime. The sequence is kept ordered after every mutation that can
/// affect order: pinned records precede unpinned ones, and within each pin
/// partition names are compared case-aware lexicographically. Ids are unique
/// across the sequence at all times.
///
/// A registry is an explicitly owned value passed by reference to the
/// projection and the display driver; there is no ambient global instance.
///
/// ## Examples
/// ```
/// use stashlib::{Registry, SourceFile};
///
/// let mut registry = Registry::new();
/// let ids = registry.ingest(vec![SourceFile::from_bytes("a.txt", vec![0; 1024])]);
/// assert_eq!(registry.len(), 1);
/// assert_eq!(registry.total_size(), 1024);
///
/// registry.delete(ids[0]);
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    records: Vec<FileRecord>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Return the number of records in the registry.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display order.
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Linear lookup by id.
    pub fn get(&self, id: RecordId) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn get_mut(&mut self, id: RecordId) -> Option<&mut FileRecord> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Append one record per source file and restore the order invariant.
    ///
    /// New records start unpinned, unshared and in the default folder. An
    /// empty batch is a no-op. Never fails: the file source already read the
    /// blobs and their metadata travels with them. Returns the fresh ids in
    /// ingestion order.
    pub fn ingest(&mut self, sources: Vec<SourceFile>) -> Vec<RecordId> {
        if sources.is_empty() {
            return vec![];
        }

        let mut ids = Vec::with_capacity(sources.len());
        for source in sources {
            let record = FileRecord::new(source);
            log::debug!(
                "Ingesting {:?} ({} bytes) as {}",
                record.name(),
                record.size(),
                record.id()
            );
            ids.push(record.id());
            self.records.push(record);
        }
        self.sort();
        ids
    }

    /// Insert a metadata-level copy of a record under a fresh id.
    ///
    /// The copy re-references the original's payload; no bytes move. Unlike
    /// the other id-keyed operations this one surfaces `NotFound`, since the
    /// caller expects a fresh id back.
    pub fn duplicate(&mut self, id: RecordId) -> Result<RecordId> {
        let copy = self
            .get(id)
            .ok_or(StashError::NotFound(id))?
            .duplicated();
        let copy_id = copy.id();
        log::debug!("Duplicated {} into {}", id, copy_id);

        self.records.push(copy);
        self.sort();
        Ok(copy_id)
    }

    /// Rename a record and restore the order invariant.
    ///
    /// The stored name is the trimmed input. Empty and whitespace-only names
    /// are rejected with the record unchanged; renaming to the current name
    /// succeeds and changes nothing.
    pub fn rename(&mut self, id: RecordId, new_name: &str) -> Result<()> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            log::debug!("Rejecting empty rename of {}", id);
            return Err(StashError::InvalidName(new_name.to_string()));
        }

        let record = self.get_mut(id).ok_or(StashError::NotFound(id))?;
        log::debug!(
            "Renaming {} from {:?} to {:?}",
            id,
            record.name(),
            trimmed
        );
        record.set_name(trimmed.to_string());
        self.sort();
        Ok(())
    }

    /// Remove a record, releasing its payload handle.
    ///
    /// Unknown ids are a benign no-op. Removal cannot violate the order
    /// invariant, so the remainder keeps its relative order without a
    /// re-sort.
    pub fn delete(&mut self, id: RecordId) {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == before {
            log::trace!("Delete of unknown id {} ignored", id);
        } else {
            log::debug!("Deleted {}", id);
        }
    }

    /// Flip the pin flag. Pinning affects ordering, so the registry
    /// re-sorts. Unknown ids are a no-op.
    pub fn toggle_pinned(&mut self, id: RecordId) {
        if let Some(record) = self.get_mut(id) {
            record.toggle_pinned();
            self.sort();
        }
    }

    /// Flip the shared display flag. Sharing does not affect ordering.
    /// Unknown ids are a no-op.
    pub fn toggle_shared(&mut self, id: RecordId) {
        if let Some(record) = self.get_mut(id) {
            record.toggle_shared();
        }
    }

    /// Total bytes across all current records, computed on demand.
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size()).sum()
    }

    fn sort(&mut self) {
        // Vec::sort_by is stable: records with equal names keep their prior
        // relative order.
        self.records.sort_by(compare);
    }
}

/// Order contract: pinned records first, then case-aware name order.
fn compare(a: &FileRecord, b: &FileRecord) -> Ordering {
    b.pinned()
        .cmp(&a.pinned())
        .then_with(|| compare_names(a.name(), b.name()))
}

/// Case-insensitive fold first, raw byte order as a deterministic tiebreak
/// between case variants.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
