//! Candidate and entry types.
//!
//! A `Candidate` is a raw file offered for admission; an `Entry` is an
//! admitted file plus its per-file editable state (title, excluded flag).

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Something that can produce the full byte content of an audio file.
pub trait AudioSource: Send + Sync {
    fn read_all(&self) -> io::Result<Vec<u8>>;
}

/// Shared handle to a file's bytes. Cloning an entry never copies audio data.
pub type SourceHandle = Arc<dyn AudioSource>;

/// Reads the bytes lazily from a path on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AudioSource for FileSource {
    fn read_all(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

/// Bytes already held in memory (e.g. produced by an upstream transcoder).
#[derive(Debug, Clone)]
pub struct MemorySource(Arc<[u8]>);

impl MemorySource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }
}

impl AudioSource for MemorySource {
    fn read_all(&self) -> io::Result<Vec<u8>> {
        Ok(self.0.to_vec())
    }
}

/// Dedup identity of a file: its name and byte length, not its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub name: String,
    pub size: u64,
}

/// A raw file offered to the ingest filter.
#[derive(Clone)]
pub struct Candidate {
    /// Declared media type, e.g. `audio/mpeg`.
    pub media_type: String,
    pub name: String,
    pub size: u64,
    pub source: SourceHandle,
}

impl Candidate {
    pub fn new(
        media_type: impl Into<String>,
        name: impl Into<String>,
        size: u64,
        source: SourceHandle,
    ) -> Self {
        Self {
            media_type: media_type.into(),
            name: name.into(),
            size,
            source,
        }
    }

    /// Candidate backed by an in-memory buffer; `size` is the buffer length.
    pub fn in_memory(
        media_type: impl Into<String>,
        name: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        let size = bytes.len() as u64;
        Self::new(media_type, name, size, Arc::new(MemorySource::new(bytes)))
    }

    pub fn identity(&self) -> Identity {
        Identity {
            name: self.name.clone(),
            size: self.size,
        }
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("media_type", &self.media_type)
            .field("name", &self.name)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// One admitted audio file.
#[derive(Clone)]
pub struct Entry {
    pub source: SourceHandle,
    pub original_name: String,
    pub original_size: u64,
    /// User-editable title. Empty means "use the file's base name".
    pub title: String,
    pub excluded: bool,
}

impl Entry {
    /// Build a fresh, active entry whose title is the file name without extension.
    pub fn from_candidate(candidate: Candidate) -> Self {
        let title = base_name(&candidate.name).to_string();
        Self {
            source: candidate.source,
            original_name: candidate.name,
            original_size: candidate.size,
            title,
            excluded: false,
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            name: self.original_name.clone(),
            size: self.original_size,
        }
    }

    pub fn has_identity(&self, identity: &Identity) -> bool {
        self.original_size == identity.size && self.original_name == identity.name
    }

    /// The title written to the tag: the user's title, or the base name when blank.
    pub fn effective_title(&self) -> &str {
        if self.title.is_empty() {
            base_name(&self.original_name)
        } else {
            &self.title
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("original_name", &self.original_name)
            .field("original_size", &self.original_size)
            .field("title", &self.title)
            .field("excluded", &self.excluded)
            .finish_non_exhaustive()
    }
}

/// Strip the final extension segment: `"a.b.mp3" -> "a.b"`, `".mp3" -> ""`.
///
/// A trailing dot with nothing after it is not an extension (`"a." -> "a."`).
pub fn base_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i + 1 < name.len() => &name[..i],
        _ => name,
    }
}
