use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};

use crate::app::WorkingSet;
use crate::commit::commit;
use crate::library::{IngestFilter, candidate_from_path, scan};
use crate::tags::{Artwork, TagTemplate};

mod cli;
mod curate;
mod logging;
mod output;
mod settings;

pub use cli::{Args, MoveIntent, TitleEdit};

/// Exit status when the archive was written but some files were left out.
const EXIT_PARTIAL: u8 = 2;

pub fn run() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init_tracing(args.verbose, args.quiet);

    let settings = settings::load_settings();

    if args.print_config {
        print!(
            "{}",
            toml::to_string_pretty(&settings).context("serializing settings")?
        );
        return Ok(ExitCode::SUCCESS);
    }

    let mut candidates = Vec::new();
    for input in &args.inputs {
        if input.is_dir() {
            candidates.extend(scan(input, &settings.ingest));
        } else {
            candidates.push(
                candidate_from_path(input)
                    .with_context(|| format!("reading {}", input.display()))?,
            );
        }
    }

    let mut set = WorkingSet::new();
    let changes = set.subscribe();
    let offered = candidates.len();
    let admitted = set.admit(&IngestFilter::from_settings(&settings.ingest), candidates);
    info!(offered, admitted, "loaded files");
    if admitted == 0 {
        bail!("no MP3 files to work with");
    }

    curate::apply_curation(&mut set, &args, &changes)?;

    if args.list {
        print!("{}", output::format_track_list(&set));
        return Ok(ExitCode::SUCCESS);
    }

    if !set.has_active() {
        bail!("every file is excluded; nothing to pack");
    }

    let mut template = TagTemplate::from_settings(&settings.template);
    if let Some(v) = &args.artist {
        template.artist = Some(v.clone());
    }
    if let Some(v) = &args.album {
        template.album = Some(v.clone());
    }
    if let Some(v) = &args.genre {
        template.genre = Some(v.clone());
    }
    if let Some(v) = &args.year {
        template.year = Some(v.clone());
    }
    if let Some(path) = &args.artwork {
        let artwork = Artwork::load(path)
            .with_context(|| format!("loading artwork {}", path.display()))?;
        template.artwork = Some(artwork);
    }
    if template.year.is_some() && template.year().is_none() {
        warn!("year is not numeric and will not be written");
    }

    let path = output::resolve_output_path(args.output.as_deref(), &settings.output);
    let report = commit(&set, &template, settings.output.compression)?;
    output::deliver(&report.archive, &path, args.force)?;
    print!("{}", output::format_report(&report, &path));

    if report.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_PARTIAL))
    }
}
