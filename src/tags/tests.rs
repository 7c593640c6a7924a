use std::io::{self, Cursor};
use std::sync::Arc;

use id3::frame::PictureType;
use id3::{Tag, TagLike};

use super::*;
use crate::error::AssembleError;
use crate::library::{AudioSource, Candidate, Entry};

const AUDIO: &[u8] = b"\xff\xfb\x90\x00opaque-frames";

fn entry(name: &str) -> Entry {
    Entry::from_candidate(Candidate::in_memory("audio/mpeg", name, AUDIO.to_vec()))
}

fn full_template() -> TagTemplate {
    TagTemplate {
        artist: Some("X".into()),
        album: Some("The Album".into()),
        genre: Some("Ambient".into()),
        year: Some("2024".into()),
        artwork: Some(Artwork::new(
            vec![0x89, b'P', b'N', b'G', 1, 2, 3],
            "image/png",
            "cover.png",
        )),
    }
}

/// Size of the leading ID3v2 block (header included), from its syncsafe length.
fn tag_block_len(bytes: &[u8]) -> usize {
    assert_eq!(&bytes[..3], b"ID3");
    let size = bytes[6..10]
        .iter()
        .fold(0usize, |acc, b| (acc << 7) | usize::from(b & 0x7f));
    size + 10
}

fn read_back(bytes: &[u8]) -> Tag {
    Tag::read_from2(Cursor::new(bytes)).unwrap()
}

fn frame_text<'a>(tag: &'a Tag, id: &str) -> Option<&'a str> {
    tag.get(id).and_then(|f| f.content().text())
}

#[test]
fn full_template_round_trips_through_the_tag_block() {
    let out = assemble(&entry("song.mp3"), &full_template(), 3).unwrap();
    let tag = read_back(&out);

    assert_eq!(tag.version(), TAG_VERSION);
    assert_eq!(tag.title(), Some("song"));
    assert_eq!(tag.artist(), Some("X"));
    assert_eq!(tag.album(), Some("The Album"));
    assert_eq!(tag.genre(), Some("Ambient"));
    assert_eq!(frame_text(&tag, "TYER"), Some("2024"));
    assert_eq!(frame_text(&tag, "TRCK"), Some("3"));

    let pictures: Vec<_> = tag.pictures().collect();
    assert_eq!(pictures.len(), 1);
    assert_eq!(pictures[0].picture_type, PictureType::CoverFront);
    assert_eq!(pictures[0].mime_type, "image/png");
    assert_eq!(pictures[0].description, "cover.png");
    assert_eq!(pictures[0].data, vec![0x89, b'P', b'N', b'G', 1, 2, 3]);
}

#[test]
fn audio_bytes_follow_the_tag_block_unchanged() {
    let out = assemble(&entry("song.mp3"), &full_template(), 1).unwrap();
    let block = tag_block_len(&out);
    assert_eq!(&out[block..], AUDIO);
}

#[test]
fn empty_template_writes_only_title_and_track() {
    let out = assemble(&entry("only.mp3"), &TagTemplate::default(), 7).unwrap();
    let tag = read_back(&out);

    let mut ids: Vec<&str> = tag.frames().map(|f| f.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["TIT2", "TRCK"]);
    assert_eq!(tag.title(), Some("only"));
    assert_eq!(frame_text(&tag, "TRCK"), Some("7"));
}

#[test]
fn blank_fields_are_treated_as_absent() {
    let template = TagTemplate {
        artist: Some("   ".into()),
        album: Some(String::new()),
        genre: Some("\t".into()),
        year: Some(" ".into()),
        artwork: Some(Artwork::new(Vec::new(), "image/png", "empty.png")),
    };
    let tag = build_tag(&entry("a.mp3"), &template, 1);

    assert!(tag.get("TPE1").is_none());
    assert!(tag.get("TALB").is_none());
    assert!(tag.get("TCON").is_none());
    assert!(tag.get("TYER").is_none());
    assert_eq!(tag.pictures().count(), 0);
}

#[test]
fn non_numeric_year_is_omitted_without_error() {
    let template = TagTemplate {
        year: Some("next year".into()),
        ..TagTemplate::default()
    };
    let out = assemble(&entry("a.mp3"), &template, 1).unwrap();
    assert!(read_back(&out).get("TYER").is_none());
}

#[test]
fn parse_year_truncates_finite_numbers() {
    assert_eq!(parse_year("2024"), Some(2024));
    assert_eq!(parse_year(" 1999 "), Some(1999));
    assert_eq!(parse_year("2024.0"), Some(2024));
    assert_eq!(parse_year("2024.5"), Some(2024));
    assert_eq!(parse_year("2.0245e3"), Some(2024));
    assert_eq!(parse_year("-3.7"), Some(-3));
    assert_eq!(parse_year("0x7E8"), Some(2024));
    assert_eq!(parse_year("0b11111101000"), Some(2024));
    assert_eq!(parse_year("0xZZ"), None);
    assert_eq!(parse_year("abc"), None);
    assert_eq!(parse_year("inf"), None);
    assert_eq!(parse_year("NaN"), None);
    assert_eq!(parse_year("1e12"), None);
}

#[test]
fn fractional_year_is_written_truncated() {
    let template = TagTemplate {
        year: Some("2024.5".into()),
        ..TagTemplate::default()
    };
    let out = assemble(&entry("a.mp3"), &template, 1).unwrap();
    assert_eq!(read_back(&out).year(), Some(2024));
}

#[test]
fn cleared_title_falls_back_to_base_name() {
    let mut e = entry("01 - Opening.mp3");
    e.title.clear();
    let tag = build_tag(&e, &TagTemplate::default(), 1);
    assert_eq!(tag.title(), Some("01 - Opening"));

    e.title = "Custom".into();
    let tag = build_tag(&e, &TagTemplate::default(), 1);
    assert_eq!(tag.title(), Some("Custom"));
}

#[test]
fn assembly_is_deterministic() {
    let e = entry("song.mp3");
    let a = assemble(&e, &full_template(), 2).unwrap();
    let b = assemble(&e, &full_template(), 2).unwrap();
    assert_eq!(a, b);
}

struct Unreadable;

impl AudioSource for Unreadable {
    fn read_all(&self) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
    }
}

#[test]
fn unreadable_source_is_a_read_error() {
    let e = Entry::from_candidate(Candidate::new("audio/mpeg", "gone.mp3", 5, Arc::new(Unreadable)));
    let err = assemble(&e, &TagTemplate::default(), 1).unwrap_err();
    assert!(matches!(err, AssembleError::Read(_)));
}

#[test]
fn artwork_load_sniffs_mime_from_magic_bytes() {
    let dir = tempfile::tempdir().unwrap();
    // PNG signature behind a misleading extension.
    let path = dir.path().join("cover.jpg");
    std::fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();

    let art = Artwork::load(&path).unwrap();
    assert_eq!(art.mime_type, "image/png");
    assert_eq!(art.display_name, "cover.jpg");
}

#[test]
fn artwork_load_rejects_unknown_and_empty_files() {
    let dir = tempfile::tempdir().unwrap();

    let empty = dir.path().join("empty.png");
    std::fs::write(&empty, b"").unwrap();
    assert!(matches!(
        Artwork::load(&empty),
        Err(crate::error::ArtworkError::Empty)
    ));

    let junk = dir.path().join("notes.txt");
    std::fs::write(&junk, b"hello").unwrap();
    assert!(matches!(
        Artwork::load(&junk),
        Err(crate::error::ArtworkError::UnsupportedFormat(_))
    ));
}

#[test]
fn template_from_settings_defaults_year_to_current() {
    use chrono::Datelike;

    let settings = crate::config::TemplateSettings {
        artist: Some("Cfg Artist".into()),
        ..Default::default()
    };
    let template = TagTemplate::from_settings(&settings);
    assert_eq!(template.artist(), Some("Cfg Artist"));
    assert_eq!(template.year(), Some(chrono::Local::now().year()));

    let settings = crate::config::TemplateSettings {
        default_to_current_year: false,
        ..Default::default()
    };
    assert_eq!(TagTemplate::from_settings(&settings).year, None);
}
