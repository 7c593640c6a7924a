//! Commit: turn the active view into one tagged archive.
//!
//! Entries are processed strictly one at a time in active-view order, so the
//! track number of an entry is its 1-based active position. The working set
//! is borrowed immutably for the whole commit and the active view is
//! snapshotted up front; nothing can reorder it mid-commit.
//!
//! A file that cannot be read or tagged is left out and reported; the rest of
//! the batch still lands in the archive. Its track number is not reused.

use tracing::{debug, info, warn};

use crate::app::WorkingSet;
use crate::archive::ArchiveBuilder;
use crate::config::Compression;
use crate::error::{AssembleError, CommitError};
use crate::library::Entry;
use crate::tags::{TagTemplate, assemble};

/// One file that made it into the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedTrack {
    pub track_number: u32,
    pub original_name: String,
    pub title: String,
    /// Name of the file inside the archive.
    pub archive_name: String,
}

/// One file that was left out of the archive.
#[derive(Debug)]
pub struct CommitFailure {
    pub track_number: u32,
    pub original_name: String,
    pub error: AssembleError,
}

#[derive(Debug)]
pub struct CommitReport {
    pub archive: Vec<u8>,
    pub tracks: Vec<CommittedTrack>,
    pub failures: Vec<CommitFailure>,
}

impl CommitReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Assemble every active entry of `set` with `template` and pack the results.
pub fn commit(
    set: &WorkingSet,
    template: &TagTemplate,
    compression: Compression,
) -> Result<CommitReport, CommitError> {
    let snapshot: Vec<&Entry> = set.active_view();
    commit_entries(&snapshot, template, compression)
}

/// Commit an explicit, already-ordered list of entries.
pub fn commit_entries(
    entries: &[&Entry],
    template: &TagTemplate,
    compression: Compression,
) -> Result<CommitReport, CommitError> {
    if entries.is_empty() {
        return Err(CommitError::EmptySelection);
    }

    info!(count = entries.len(), "committing active entries");

    let mut builder = ArchiveBuilder::new(compression);
    let mut tracks = Vec::with_capacity(entries.len());
    let mut failures = Vec::new();

    for (track_number, entry) in (1u32..).zip(entries.iter().copied()) {
        let title = entry.effective_title();
        match assemble(entry, template, track_number) {
            Ok(bytes) => {
                let archive_name = builder.append(title, &bytes)?;
                debug!(
                    track_number,
                    name = %entry.original_name,
                    archive_name = %archive_name,
                    bytes = bytes.len(),
                    "tagged"
                );
                tracks.push(CommittedTrack {
                    track_number,
                    original_name: entry.original_name.clone(),
                    title: title.to_string(),
                    archive_name,
                });
            }
            Err(error) => {
                warn!(
                    track_number,
                    name = %entry.original_name,
                    error = %error,
                    "leaving file out of archive"
                );
                failures.push(CommitFailure {
                    track_number,
                    original_name: entry.original_name.clone(),
                    error,
                });
            }
        }
    }

    if tracks.is_empty() {
        return Err(CommitError::AllFailed(failures));
    }

    let archive = builder.finish()?;
    info!(
        tracks = tracks.len(),
        failures = failures.len(),
        bytes = archive.len(),
        "archive ready"
    );

    Ok(CommitReport {
        archive,
        tracks,
        failures,
    })
}

#[cfg(test)]
mod tests;
