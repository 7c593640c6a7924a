use std::collections::HashSet;

const EXTENSION: &str = ".mp3";
const FALLBACK_STEM: &str = "track";
/// Characters Windows refuses in file names, besides controls.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Hands out unique archive entry names of the form `<title>.mp3`.
///
/// Collisions are compared ASCII case-insensitively and resolved with a
/// ` (n)` suffix: `Song.mp3`, `Song (2).mp3`, `Song (3).mp3`.
#[derive(Debug, Default)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, title: &str) -> String {
        let stem = stem_for(title);

        let mut candidate = format!("{stem}{EXTENSION}");
        let mut n = 2;
        while !self.taken.insert(candidate.to_ascii_lowercase()) {
            candidate = format!("{stem} ({n}){EXTENSION}");
            n += 1;
        }
        candidate
    }
}

/// Sanitized name stem: no path separators, reserved or control characters, no
/// trailing `.mp3`, never empty.
fn stem_for(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let mut stem = cleaned.trim();

    let len = stem.len();
    if len >= EXTENSION.len() && stem.is_char_boundary(len - EXTENSION.len()) {
        let (head, tail) = stem.split_at(len - EXTENSION.len());
        if tail.eq_ignore_ascii_case(EXTENSION) {
            stem = head.trim_end();
        }
    }

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}
