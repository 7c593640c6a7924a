//! Error types for the tagging pipeline.
//!
//! Admission rejections and malformed optional fields are not errors (they are
//! dropped or omitted silently); everything here is a real failure that a
//! caller can act on.

use std::io;

use thiserror::Error;

use crate::commit::CommitFailure;

/// Rejected working-set operation. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    /// Global position outside `[0, len)`.
    #[error("position {position} is out of range (working set has {len} entries)")]
    PositionOutOfRange { position: usize, len: usize },

    /// Active-view position outside `[0, active)`.
    #[error("active position {position} is out of range ({active} active entries)")]
    ActivePositionOutOfRange { position: usize, active: usize },
}

/// Artwork could not be loaded from disk.
#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("failed to read artwork: {0}")]
    Io(#[from] io::Error),

    #[error("artwork is empty")]
    Empty,

    #[error("unrecognised artwork image format: {0}")]
    UnsupportedFormat(String),
}

/// Failure while producing one tagged file.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// The entry's source bytes could not be read.
    #[error("failed to read source bytes: {0}")]
    Read(#[from] io::Error),

    /// The tag block could not be encoded.
    #[error("failed to encode tag block: {0}")]
    Encode(#[from] id3::Error),
}

/// Failure of the archive container itself.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to write archive entry: {0}")]
    Io(#[from] io::Error),
}

/// Commit could not produce an archive.
#[derive(Debug, Error)]
pub enum CommitError {
    /// There are no active entries; nothing to commit.
    #[error("nothing to commit: no active entries")]
    EmptySelection,

    /// Every active entry failed to assemble.
    #[error("all {} active entries failed to assemble", .0.len())]
    AllFailed(Vec<CommitFailure>),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
