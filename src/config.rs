//! Configuration loader and schema types.
//!
//! This module exposes the settings schema (ingest policy, template
//! defaults, archive output) and helpers to load it from disk and env.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
