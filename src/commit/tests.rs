use std::io::{self, Cursor, Read};
use std::sync::Arc;

use id3::{Tag, TagLike};
use zip::ZipArchive;

use super::*;
use crate::library::{AudioSource, Candidate, IngestFilter};
use crate::tags::Artwork;

fn mp3(name: &str, size: usize) -> Candidate {
    Candidate::in_memory("audio/mpeg", name, vec![0xAAu8; size])
}

fn set_of(candidates: Vec<Candidate>) -> WorkingSet {
    let mut set = WorkingSet::new();
    set.admit(&IngestFilter::default(), candidates);
    set
}

/// `(archive name, tag, audio payload)` for every archive entry, in order.
fn unpack(archive: &[u8]) -> Vec<(String, Tag, Vec<u8>)> {
    let mut zip = ZipArchive::new(Cursor::new(archive)).unwrap();
    (0..zip.len())
        .map(|i| {
            let mut file = zip.by_index(i).unwrap();
            let mut data = Vec::new();
            file.read_to_end(&mut data).unwrap();
            let tag = Tag::read_from2(Cursor::new(&data)).unwrap();
            let size = data[6..10]
                .iter()
                .fold(0usize, |acc, b| (acc << 7) | usize::from(b & 0x7f));
            let audio = data[size + 10..].to_vec();
            (file.name().to_string(), tag, audio)
        })
        .collect()
}

fn track_of(tag: &Tag) -> Option<&str> {
    tag.get("TRCK").and_then(|f| f.content().text())
}

fn year_of(tag: &Tag) -> Option<&str> {
    tag.get("TYER").and_then(|f| f.content().text())
}

#[test]
fn excluded_file_is_absent_and_the_rest_are_renumbered() {
    let mut set = set_of(vec![mp3("a.mp3", 10), mp3("b.mp3", 20), mp3("c.mp3", 30)]);
    set.exclude(1).unwrap();

    let template = TagTemplate {
        artist: Some("X".into()),
        year: Some("2024".into()),
        ..TagTemplate::default()
    };
    let report = commit(&set, &template, Compression::Deflated).unwrap();
    assert!(report.is_complete());

    let files = unpack(&report.archive);
    assert_eq!(files.len(), 2);

    let (name, tag, audio) = &files[0];
    assert_eq!(name, "a.mp3");
    assert_eq!(tag.title(), Some("a"));
    assert_eq!(track_of(tag), Some("1"));
    assert_eq!(tag.artist(), Some("X"));
    assert_eq!(year_of(tag), Some("2024"));
    assert_eq!(audio, &vec![0xAAu8; 10]);

    let (name, tag, audio) = &files[1];
    assert_eq!(name, "c.mp3");
    assert_eq!(tag.title(), Some("c"));
    assert_eq!(track_of(tag), Some("2"));
    assert_eq!(tag.artist(), Some("X"));
    assert_eq!(year_of(tag), Some("2024"));
    assert_eq!(audio.len(), 30);

    assert!(files.iter().all(|(n, _, _)| n != "b.mp3"));
}

#[test]
fn entry_count_and_track_numbers_follow_the_active_view() {
    let mut set = set_of(
        ["one", "two", "three", "four", "five"]
            .iter()
            .enumerate()
            .map(|(i, n)| mp3(&format!("{n}.mp3"), i + 1))
            .collect(),
    );
    set.exclude(0).unwrap();
    set.exclude(3).unwrap();
    set.move_active(2, 0).unwrap();

    let expected: Vec<String> = set
        .active_view()
        .iter()
        .map(|e| e.effective_title().to_string())
        .collect();
    assert_eq!(expected, vec!["five", "two", "three"]);

    let report = commit(&set, &TagTemplate::default(), Compression::Stored).unwrap();
    let files = unpack(&report.archive);
    assert_eq!(files.len(), set.active_count());

    for (i, (_, tag, _)) in files.iter().enumerate() {
        let n = (i + 1).to_string();
        assert_eq!(track_of(tag), Some(n.as_str()));
        assert_eq!(tag.title(), Some(expected[i].as_str()));
    }

    let numbers: Vec<u32> = report.tracks.iter().map(|t| t.track_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn edited_titles_name_the_archive_entries() {
    let mut set = set_of(vec![mp3("x.mp3", 1), mp3("y.mp3", 2), mp3("z.mp3", 3)]);
    set.edit_title(0, "Same").unwrap();
    set.edit_title(1, "Same").unwrap();
    set.edit_title(2, "").unwrap();

    let report = commit(&set, &TagTemplate::default(), Compression::Deflated).unwrap();
    let names: Vec<&str> = report
        .tracks
        .iter()
        .map(|t| t.archive_name.as_str())
        .collect();
    assert_eq!(names, vec!["Same.mp3", "Same (2).mp3", "z.mp3"]);
}

#[test]
fn artwork_is_embedded_once_in_every_file() {
    let set = set_of(vec![mp3("a.mp3", 4), mp3("b.mp3", 4)]);
    let template = TagTemplate {
        artwork: Some(Artwork::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg", "front.jpg")),
        ..TagTemplate::default()
    };

    let report = commit(&set, &template, Compression::Deflated).unwrap();
    for (_, tag, _) in unpack(&report.archive) {
        let pictures: Vec<_> = tag.pictures().collect();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].description, "front.jpg");
        assert_eq!(pictures[0].mime_type, "image/jpeg");
    }
}

#[test]
fn empty_active_view_is_refused() {
    let mut set = set_of(vec![mp3("a.mp3", 1)]);
    set.exclude(0).unwrap();
    assert!(matches!(
        commit(&set, &TagTemplate::default(), Compression::Deflated),
        Err(CommitError::EmptySelection)
    ));

    let empty = WorkingSet::new();
    assert!(matches!(
        commit(&empty, &TagTemplate::default(), Compression::Deflated),
        Err(CommitError::EmptySelection)
    ));
}

struct Unreadable;

impl AudioSource for Unreadable {
    fn read_all(&self) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }
}

fn unreadable(name: &str) -> Candidate {
    Candidate::new("audio/mpeg", name, 99, Arc::new(Unreadable))
}

#[test]
fn one_unreadable_file_does_not_sink_the_batch() {
    let set = set_of(vec![mp3("a.mp3", 1), unreadable("bad.mp3"), mp3("c.mp3", 3)]);

    let report = commit(&set, &TagTemplate::default(), Compression::Deflated).unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].original_name, "bad.mp3");
    assert_eq!(report.failures[0].track_number, 2);
    assert!(matches!(report.failures[0].error, AssembleError::Read(_)));

    let files = unpack(&report.archive);
    let summary: Vec<(&str, Option<&str>)> = files
        .iter()
        .map(|(n, t, _)| (n.as_str(), track_of(t)))
        .collect();
    assert_eq!(summary, vec![("a.mp3", Some("1")), ("c.mp3", Some("3"))]);
}

#[test]
fn all_files_failing_is_an_error() {
    let set = set_of(vec![unreadable("x.mp3"), unreadable("y.mp3")]);
    match commit(&set, &TagTemplate::default(), Compression::Deflated) {
        Err(CommitError::AllFailed(failures)) => {
            let names: Vec<&str> = failures.iter().map(|f| f.original_name.as_str()).collect();
            assert_eq!(names, vec!["x.mp3", "y.mp3"]);
        }
        other => panic!("expected AllFailed, got {other:?}"),
    }
}

#[test]
fn committing_twice_gives_the_same_archive() {
    let set = set_of(vec![mp3("a.mp3", 8), mp3("b.mp3", 9)]);
    let template = TagTemplate {
        album: Some("Repeatable".into()),
        ..TagTemplate::default()
    };
    let first = commit(&set, &template, Compression::Deflated).unwrap();
    let second = commit(&set, &template, Compression::Deflated).unwrap();
    assert_eq!(first.archive, second.archive);
}
