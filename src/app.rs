//! Application module: the curated working set the user edits before commit.
//!
//! `WorkingSet` lives in `app::model` and owns the ordered entries, the
//! exclude flags and the reorder algorithm.

mod model;

pub use model::*;
