use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tagpack/config.toml` or `~/.config/tagpack/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TAGPACK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub ingest: IngestSettings,
    pub template: TemplateSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Declared media types admitted into the working set.
    ///
    /// The defaults are two aliases of the same format.
    pub accepted_types: Vec<String>,
    /// File extensions picked up when scanning a directory (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            accepted_types: vec!["audio/mpeg".into(), "audio/mp3".into()],
            extensions: vec!["mp3".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

/// Defaults for the shared tag template. Command-line values win over these.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateSettings {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    /// Free text; only applied to files when it parses as a whole number.
    pub year: Option<String>,
    /// Use the current local year when no year is configured.
    pub default_to_current_year: bool,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            artist: None,
            album: None,
            genre: None,
            year: None,
            default_to_current_year: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// File name of the produced archive.
    pub archive_name: String,
    /// Directory the archive is written to. Defaults to the current directory.
    pub directory: Option<PathBuf>,
    pub compression: Compression,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            archive_name: "tagged_mp3s.zip".to_string(),
            directory: None,
            compression: Compression::Deflated,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compression {
    #[serde(alias = "store", alias = "none")]
    Stored,
    #[serde(alias = "deflate")]
    Deflated,
}

impl Default for Compression {
    fn default() -> Self {
        Self::Deflated
    }
}
