use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::warn;
use walkdir::WalkDir;

use crate::config::IngestSettings;

use super::model::{Candidate, FileSource};

fn has_scan_extension(path: &Path, settings: &IngestSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Declared media type for a file on disk, guessed from its extension.
///
/// Non-MP3 audio maps to its own type so the ingest filter can reject it.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("mp3" | "mpga") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("wav") => "audio/wav",
        Some("ogg" | "oga") => "audio/ogg",
        Some("m4a" | "mp4") => "audio/mp4",
        Some("aac") => "audio/aac",
        _ => "application/octet-stream",
    }
}

/// Describe a single file on disk as a candidate. Bytes are read at commit time.
pub fn candidate_from_path(path: &Path) -> io::Result<Candidate> {
    let meta = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a valid file name: {}", path.display()),
            )
        })?;

    Ok(Candidate::new(
        media_type_for_path(path),
        name,
        meta.len(),
        Arc::new(FileSource::new(path)),
    ))
}

/// Collect candidates from a directory, ordered by file name within each directory.
pub fn scan(dir: &Path, settings: &IngestSettings) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();

    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && has_scan_extension(path, settings)
        {
            match candidate_from_path(path) {
                Ok(c) => candidates.push(c),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable file"),
            }
        }
    }

    candidates
}
