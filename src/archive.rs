//! Archive output: unique entry naming and the zip builder.

mod builder;
mod naming;

pub use builder::{ArchiveBuilder, build};
pub use naming::NameAllocator;
