use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "tagpack")]
#[command(about = "Tag a batch of MP3 files with shared metadata and pack them into one zip")]
#[command(version)]
pub struct Args {
    /// MP3 files or directories to load, in order.
    #[arg(required_unless_present = "print_config")]
    pub inputs: Vec<PathBuf>,

    /// Artist written to every file.
    #[arg(short, long)]
    pub artist: Option<String>,

    /// Album written to every file.
    #[arg(short = 'b', long)]
    pub album: Option<String>,

    /// Genre written to every file.
    #[arg(short, long)]
    pub genre: Option<String>,

    /// Year written to every file (ignored unless numeric).
    #[arg(short, long)]
    pub year: Option<String>,

    /// Cover image embedded as front-cover artwork in every file.
    #[arg(long, value_name = "PATH")]
    pub artwork: Option<PathBuf>,

    /// Exclude the N-th loaded file (1-based). Repeatable.
    #[arg(short = 'x', long = "exclude", value_name = "N")]
    pub excludes: Vec<usize>,

    /// Override the title of the N-th loaded file (1-based). Repeatable.
    #[arg(short = 't', long = "title", value_name = "N=TEXT")]
    pub titles: Vec<TitleEdit>,

    /// Move the track at active position FROM to TO (1-based). Applied left to right.
    #[arg(short = 'm', long = "move", value_name = "FROM:TO")]
    pub moves: Vec<MoveIntent>,

    /// Archive path. Defaults to the configured directory and archive name.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite an existing archive.
    #[arg(long)]
    pub force: bool,

    /// Print the final track list and exit without writing anything.
    #[arg(long)]
    pub list: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,

    /// More log output (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Less log output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

/// `N=TEXT`: new title for the N-th loaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEdit {
    pub position: usize,
    pub title: String,
}

impl FromStr for TitleEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (n, title) = s
            .split_once('=')
            .ok_or_else(|| format!("expected N=TEXT, got `{s}`"))?;
        let position = parse_position(n)?;
        Ok(Self {
            position,
            title: title.to_string(),
        })
    }
}

/// `FROM:TO`: active-view move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub from: usize,
    pub to: usize,
}

impl FromStr for MoveIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once(':')
            .ok_or_else(|| format!("expected FROM:TO, got `{s}`"))?;
        Ok(Self {
            from: parse_position(from)?,
            to: parse_position(to)?,
        })
    }
}

/// Parse a 1-based position and return it 0-based.
fn parse_position(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a positive number"))?;
    n.checked_sub(1)
        .ok_or_else(|| "positions start at 1".to_string())
}
