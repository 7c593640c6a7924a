//! Batch MP3 tagging pipeline.
//!
//! Files are admitted into an ordered [`app::WorkingSet`], curated (exclude,
//! retitle, reorder), then committed: every active entry gets an ID3v2 tag
//! built from a shared [`tags::TagTemplate`] and its 1-based position as track
//! number, and the results are packed into one zip archive.

pub mod app;
pub mod archive;
pub mod commit;
pub mod config;
pub mod error;
pub mod library;
pub mod runtime;
pub mod tags;
