//! Per-file tag assembly.
//!
//! Output layout is `[ID3v2.3 tag block][original audio bytes]`. The audio
//! payload is opaque: it is copied through untouched.

use id3::frame::{Picture, PictureType};
use id3::{Tag, TagLike, Version};

use crate::error::AssembleError;
use crate::library::Entry;

use super::template::TagTemplate;

/// Tag version written to every file.
pub const TAG_VERSION: Version = Version::Id3v23;

/// Picture type used for the single artwork frame.
pub const COVER_PICTURE_TYPE: PictureType = PictureType::CoverFront;

/// Build the in-memory tag for one entry at the given 1-based track number.
///
/// Frames are only added for present template fields; title and track number
/// are always present.
pub fn build_tag(entry: &Entry, template: &TagTemplate, track_number: u32) -> Tag {
    let mut tag = Tag::new();

    tag.set_title(entry.effective_title());
    if let Some(artist) = template.artist() {
        tag.set_artist(artist);
    }
    if let Some(album) = template.album() {
        tag.set_album(album);
    }
    if let Some(genre) = template.genre() {
        tag.set_genre(genre);
    }
    if let Some(year) = template.year() {
        tag.set_year(year);
    }
    tag.set_track(track_number);

    if let Some(artwork) = template.artwork() {
        tag.add_frame(Picture {
            mime_type: artwork.mime_type.clone(),
            picture_type: COVER_PICTURE_TYPE,
            description: artwork.display_name.clone(),
            data: artwork.bytes.clone(),
        });
    }

    tag
}

/// Encode a tag as a standalone ID3v2 block.
pub fn encode_tag(tag: &Tag) -> Result<Vec<u8>, AssembleError> {
    let mut block = Vec::new();
    tag.write_to(&mut block, TAG_VERSION)?;
    Ok(block)
}

/// Prefix `audio` with an already-encoded tag block.
pub fn prefix_tag(tag_block: &[u8], audio: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(tag_block.len() + audio.len());
    out.extend_from_slice(tag_block);
    out.extend_from_slice(audio);
    out
}

/// Produce the tagged bytes for one entry.
///
/// Fails only if the source bytes cannot be read or the tag cannot be encoded.
pub fn assemble(
    entry: &Entry,
    template: &TagTemplate,
    track_number: u32,
) -> Result<Vec<u8>, AssembleError> {
    let tag = build_tag(entry, template, track_number);
    let block = encode_tag(&tag)?;
    let audio = entry.source.read_all()?;
    Ok(prefix_tag(&block, &audio))
}
