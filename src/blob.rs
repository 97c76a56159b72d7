use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crc32fast::Hasher;
use walkdir::WalkDir;

use crate::errors::Result;

/// Ownership handle to a record's binary payload.
///
/// Cloning re-references the same bytes; the payload is released when the
/// last handle is dropped. Duplicating a record is therefore metadata-level,
/// never a byte copy.
#[derive(Clone)]
pub struct Blob {
    bytes: Arc<[u8]>,
    checksum: u32,
}

impl Blob {
    pub fn new(bytes: Vec<u8>) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(&bytes);
        Blob {
            checksum: hasher.finalize(),
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// CRC32 of the payload, computed once at construction.
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// True when both handles reference the same allocation.
    pub fn same_payload(&self, other: &Blob) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The payload itself is opaque; only its shape is interesting.
        f.debug_struct("Blob")
            .field("len", &self.bytes.len())
            .field("checksum", &self.checksum)
            .finish()
    }
}

/// One raw file yielded by a [`FileSource`]: the metadata the registry
/// copies at ingestion plus the payload it takes ownership of.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub size: u64,
    pub content: Blob,
}

impl SourceFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let content = Blob::new(bytes);
        SourceFile {
            name: name.into(),
            size: content.len(),
            content,
        }
    }
}

/// Where raw files come from: a drag-and-drop surface, a file picker, or a
/// folder on disk. The registry never talks to the underlying source
/// directly; it only sees the gathered [`SourceFile`]s.
pub trait FileSource {
    /// Collect the files this source currently offers.
    fn gather(&self) -> Result<Vec<SourceFile>>;
}

/// In-memory source, the unit-level analogue of a picker selection.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: Vec<SourceFile>,
}

impl MemorySource {
    pub fn new(files: Vec<SourceFile>) -> Self {
        MemorySource { files }
    }
}

impl FileSource for MemorySource {
    fn gather(&self) -> Result<Vec<SourceFile>> {
        Ok(self.files.clone())
    }
}

/// Source backed by a directory on disk, gathered recursively.
#[derive(Debug)]
pub struct DiskSource {
    root: PathBuf,
}

impl DiskSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        DiskSource {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl FileSource for DiskSource {
    fn gather(&self) -> Result<Vec<SourceFile>> {
        log::debug!("Gathering files under {:?}", self.root);

        let mut files = vec![];
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !should_gather(&entry) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let bytes = fs::read(entry.path())?;
            files.push(SourceFile::from_bytes(name, bytes));
        }
        Ok(files)
    }
}

/// Hidden files never reach the registry; every other regular file does,
/// empty files included (a zero-byte upload is a legal record).
fn should_gather(entry: &walkdir::DirEntry) -> bool {
    if entry
        .file_name()
        .to_string_lossy()
        .starts_with('.')
    {
        log::trace!("Ignoring hidden file: {:?}", entry.path());
        return false;
    }

    if !entry.file_type().is_file() {
        log::trace!("Ignoring non-file: {:?}", entry.path());
        return false;
    }

    true
}
