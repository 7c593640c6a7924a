//! The ordered working set: every admitted entry, excluded ones included,
//! in a single sequence.
//!
//! The active view (non-excluded entries, in order) is derived on every read
//! and defines final track order. Mutations are announced to subscribers so a
//! presentation layer can redraw without owning the state.

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use crate::error::SetError;
use crate::library::{Candidate, Entry, IngestFilter};

/// A state change emitted by [`WorkingSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetChange {
    /// `count` entries were appended.
    Admitted { count: usize },
    /// The entry at this global position became excluded.
    Excluded { position: usize },
    /// The entry at this global position got a new title.
    TitleEdited { position: usize },
    /// An active entry moved between these active positions.
    Moved { from: usize, to: usize },
}

#[derive(Default)]
pub struct WorkingSet {
    entries: Vec<Entry>,
    subscribers: Vec<Sender<SetChange>>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in global order, excluded ones included.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.excluded).count()
    }

    /// Whether a commit is currently possible.
    pub fn has_active(&self) -> bool {
        self.entries.iter().any(|e| !e.excluded)
    }

    /// Non-excluded entries in current order. Recomputed on every call.
    pub fn active_view(&self) -> Vec<&Entry> {
        self.entries.iter().filter(|e| !e.excluded).collect()
    }

    /// Global positions of the active entries, in active order.
    pub fn active_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.excluded)
            .map(|(i, _)| i)
            .collect()
    }

    /// Register a subscriber. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> Receiver<SetChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, change: SetChange) {
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    /// Append entries produced by an [`IngestFilter`]. Returns how many were added.
    ///
    /// Entries whose identity is already present are skipped so the set never
    /// holds two files with the same `(name, size)`.
    pub fn extend(&mut self, entries: Vec<Entry>) -> usize {
        let mut added = 0;
        for entry in entries {
            let identity = entry.identity();
            if self.entries.iter().any(|e| e.has_identity(&identity)) {
                debug!(name = %identity.name, size = identity.size, "skipping duplicate entry");
                continue;
            }
            self.entries.push(entry);
            added += 1;
        }
        if added > 0 {
            self.notify(SetChange::Admitted { count: added });
        }
        added
    }

    /// Run `candidates` through `filter` and append whatever it admits.
    pub fn admit<I>(&mut self, filter: &IngestFilter, candidates: I) -> usize
    where
        I: IntoIterator<Item = Candidate>,
    {
        let admitted = filter.admit(candidates, &self.entries);
        self.extend(admitted)
    }

    fn check_position(&self, position: usize) -> Result<(), SetError> {
        if position < self.entries.len() {
            Ok(())
        } else {
            Err(SetError::PositionOutOfRange {
                position,
                len: self.entries.len(),
            })
        }
    }

    /// Exclude the entry at a global position. Excluding twice is a no-op.
    pub fn exclude(&mut self, position: usize) -> Result<(), SetError> {
        self.check_position(position)?;
        let entry = &mut self.entries[position];
        if entry.excluded {
            return Ok(());
        }
        entry.excluded = true;
        debug!(position, name = %entry.original_name, "excluded entry");
        self.notify(SetChange::Excluded { position });
        Ok(())
    }

    /// Replace the title of the entry at a global position. Empty is allowed.
    pub fn edit_title(&mut self, position: usize, value: impl Into<String>) -> Result<(), SetError> {
        self.check_position(position)?;
        self.entries[position].title = value.into();
        self.notify(SetChange::TitleEdited { position });
        Ok(())
    }

    /// Move an active entry from one active position to another.
    ///
    /// The entry is removed at its global position and reinserted at the global
    /// position the target entry held before the removal. Excluded entries never
    /// move themselves but may shift by one slot as the moved entry passes them.
    pub fn move_active(&mut self, from: usize, to: usize) -> Result<(), SetError> {
        let active = self.active_indices();
        let resolve = |position: usize| {
            active
                .get(position)
                .copied()
                .ok_or(SetError::ActivePositionOutOfRange {
                    position,
                    active: active.len(),
                })
        };
        let from_global = resolve(from)?;
        let to_global = resolve(to)?;

        if from == to {
            return Ok(());
        }

        let entry = self.entries.remove(from_global);
        self.entries.insert(to_global, entry);
        debug!(from, to, from_global, to_global, "moved active entry");
        self.notify(SetChange::Moved { from, to });
        Ok(())
    }
}
