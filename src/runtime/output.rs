use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::app::WorkingSet;
use crate::commit::CommitReport;
use crate::config::OutputSettings;

/// Where the archive goes: `--output`, else `<directory>/<archive_name>`.
pub fn resolve_output_path(explicit: Option<&Path>, settings: &OutputSettings) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    settings
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(settings.archive_name.trim())
}

/// Write the archive buffer to disk. Refuses to clobber unless `force`.
pub fn deliver(archive: &[u8], path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, archive).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = archive.len(), "archive written");
    Ok(())
}

/// One line per active entry, numbered the way commit will number them.
pub fn format_track_list(set: &WorkingSet) -> String {
    let active = set.active_view();
    let width = active.len().to_string().len();
    let mut out = String::new();
    for (i, entry) in active.iter().enumerate() {
        out.push_str(&format!(
            "{:>width$}. {}  ({})\n",
            i + 1,
            entry.effective_title(),
            entry.original_name
        ));
    }
    out
}

pub fn format_report(report: &CommitReport, path: &Path) -> String {
    let mut out = format!(
        "wrote {} track(s) to {}\n",
        report.tracks.len(),
        path.display()
    );
    for t in &report.tracks {
        out.push_str(&format!("  {:>3}  {}\n", t.track_number, t.archive_name));
    }
    for f in &report.failures {
        out.push_str(&format!(
            "  failed: {} (track {}): {}\n",
            f.original_name, f.track_number, f.error
        ));
    }
    out
}
