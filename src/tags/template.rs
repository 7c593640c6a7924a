use std::path::Path;

use chrono::Datelike;

use crate::config::TemplateSettings;
use crate::error::ArtworkError;

/// Cover image shared by every file in a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    /// Written as the picture description.
    pub display_name: String,
}

impl Artwork {
    pub fn new(
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            display_name: display_name.into(),
        }
    }

    /// Load an image file. The MIME type comes from the image's magic bytes,
    /// falling back to the file extension.
    pub fn load(path: &Path) -> Result<Self, ArtworkError> {
        let bytes = std::fs::read(path)?;
        let display_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        if bytes.is_empty() {
            return Err(ArtworkError::Empty);
        }

        let mime_type = sniff_image_mime(&bytes)
            .or_else(|| image_mime_for_path(path))
            .ok_or_else(|| ArtworkError::UnsupportedFormat(display_name.clone()))?;

        Ok(Self::new(bytes, mime_type, display_name))
    }
}

fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes)
        .filter(|t| t.matcher_type() == infer::MatcherType::Image)
        .map(|t| t.mime_type())
}

fn image_mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Metadata applied identically to every active entry.
///
/// All fields are optional; blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTemplate {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    /// Free text; see [`TagTemplate::year`].
    pub year: Option<String>,
    pub artwork: Option<Artwork>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl TagTemplate {
    /// Template seeded from configured defaults.
    pub fn from_settings(settings: &TemplateSettings) -> Self {
        let year = settings.year.clone().or_else(|| {
            settings
                .default_to_current_year
                .then(|| chrono::Local::now().year().to_string())
        });

        Self {
            artist: settings.artist.clone(),
            album: settings.album.clone(),
            genre: settings.genre.clone(),
            year,
            artwork: None,
        }
    }

    pub fn artist(&self) -> Option<&str> {
        present(&self.artist)
    }

    pub fn album(&self) -> Option<&str> {
        present(&self.album)
    }

    pub fn genre(&self) -> Option<&str> {
        present(&self.genre)
    }

    /// The year, when the text is numeric. Fractions are truncated.
    pub fn year(&self) -> Option<i32> {
        present(&self.year).and_then(parse_year)
    }

    pub fn artwork(&self) -> Option<&Artwork> {
        self.artwork.as_ref().filter(|a| !a.bytes.is_empty())
    }
}

/// Parse free-text year input as a number truncated toward zero.
///
/// Decimal, exponent and `0x`/`0o`/`0b` integer forms are accepted.
/// Non-numeric or non-finite text, and values outside `i32`, yield `None`.
pub fn parse_year(text: &str) -> Option<i32> {
    let text = text.trim();
    let value = match radix_literal(text) {
        Some(parsed) => parsed? as f64,
        None => text.parse::<f64>().ok()?,
    };
    if !value.is_finite() {
        return None;
    }
    let value = value.trunc();
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

/// `Some` when `text` carries a radix prefix; the inner `None` means the
/// digits after it are invalid.
fn radix_literal(text: &str) -> Option<Option<i64>> {
    let prefix = text.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    Some(i64::from_str_radix(&text[2..], radix).ok())
}
