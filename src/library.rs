//! Ingest side of the pipeline: candidate/entry types, the admission filter
//! and the directory scanner that turns paths into candidates.

mod ingest;
mod model;
mod scan;

pub use ingest::IngestFilter;
pub use model::*;
pub use scan::{candidate_from_path, media_type_for_path, scan};
