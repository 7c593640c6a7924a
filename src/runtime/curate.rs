use anyhow::{Context, Result};
use tracing::debug;

use crate::app::{SetChange, WorkingSet};

use super::cli::Args;

/// Apply the command-line curation intents: excludes, then title edits, then
/// moves in the order given. Excludes and titles address loaded positions;
/// moves address the active view as it stands after the previous steps.
pub fn apply_curation(
    set: &mut WorkingSet,
    args: &Args,
    changes: &std::sync::mpsc::Receiver<SetChange>,
) -> Result<()> {
    for &n in &args.excludes {
        let position = n
            .checked_sub(1)
            .context("--exclude positions start at 1")?;
        set.exclude(position)
            .with_context(|| format!("--exclude {n}"))?;
    }

    for edit in &args.titles {
        set.edit_title(edit.position, edit.title.clone())
            .with_context(|| format!("--title {}={}", edit.position + 1, edit.title))?;
    }

    for mv in &args.moves {
        set.move_active(mv.from, mv.to)
            .with_context(|| format!("--move {}:{}", mv.from + 1, mv.to + 1))?;
    }

    for change in changes.try_iter() {
        debug!(?change, "working set changed");
    }
    Ok(())
}
