//! Shared tag template and the per-file tag assembler.

mod assemble;
mod template;

pub use assemble::{COVER_PICTURE_TYPE, TAG_VERSION, assemble, build_tag, encode_tag, prefix_tag};
pub use template::{Artwork, TagTemplate, parse_year};

#[cfg(test)]
mod tests;
