use std::collections::HashSet;

use tracing::debug;

use crate::config::IngestSettings;

use super::model::{Candidate, Entry, Identity};

/// Admission policy for new files: declared media type plus `(name, size)` dedup.
#[derive(Debug, Clone)]
pub struct IngestFilter {
    accepted_types: Vec<String>,
}

impl Default for IngestFilter {
    fn default() -> Self {
        Self::from_settings(&IngestSettings::default())
    }
}

impl IngestFilter {
    pub fn new<I, S>(accepted_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted_types = accepted_types
            .into_iter()
            .map(|t| t.as_ref().trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { accepted_types }
    }

    pub fn from_settings(settings: &IngestSettings) -> Self {
        Self::new(&settings.accepted_types)
    }

    pub fn accepts_type(&self, media_type: &str) -> bool {
        let media_type = media_type.trim();
        self.accepted_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(media_type))
    }

    /// Turn the acceptable candidates into fresh entries, in presentation order.
    ///
    /// Wrong media types and identities already present in `current` (or earlier
    /// in the same batch) are dropped without error. `current` is not modified;
    /// the caller appends the returned entries.
    pub fn admit<I>(&self, candidates: I, current: &[Entry]) -> Vec<Entry>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let mut seen: HashSet<Identity> = current.iter().map(Entry::identity).collect();
        let mut admitted = Vec::new();

        for candidate in candidates {
            if !self.accepts_type(&candidate.media_type) {
                debug!(
                    name = %candidate.name,
                    media_type = %candidate.media_type,
                    "rejected candidate: media type not accepted"
                );
                continue;
            }
            if !seen.insert(candidate.identity()) {
                debug!(
                    name = %candidate.name,
                    size = candidate.size,
                    "rejected candidate: already in working set"
                );
                continue;
            }
            admitted.push(Entry::from_candidate(candidate));
        }

        admitted
    }
}
