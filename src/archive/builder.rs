use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::config::Compression;
use crate::error::ArchiveError;

use super::naming::NameAllocator;

impl From<Compression> for CompressionMethod {
    fn from(c: Compression) -> Self {
        match c {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Sequential, single-writer zip builder backed by an in-memory buffer.
///
/// Entry timestamps are pinned to the zip epoch so identical input yields an
/// identical archive.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    names: NameAllocator,
    entries: usize,
}

impl ArchiveBuilder {
    pub fn new(compression: Compression) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(compression.into())
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options,
            names: NameAllocator::new(),
            entries: 0,
        }
    }

    /// Append one file named after `title`. Returns the name actually used.
    pub fn append(&mut self, title: &str, bytes: &[u8]) -> Result<String, ArchiveError> {
        let name = self.names.allocate(title);
        self.writer.start_file(name.as_str(), self.options)?;
        self.writer.write_all(bytes)?;
        self.entries += 1;
        Ok(name)
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Write the central directory and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>, ArchiveError> {
        Ok(self.writer.finish()?.into_inner())
    }
}

/// Build an archive from `(title, bytes)` pairs in the given order.
pub fn build<I, S, B>(named_buffers: I, compression: Compression) -> Result<Vec<u8>, ArchiveError>
where
    I: IntoIterator<Item = (S, B)>,
    S: AsRef<str>,
    B: AsRef<[u8]>,
{
    let mut builder = ArchiveBuilder::new(compression);
    for (title, bytes) in named_buffers {
        builder.append(title.as_ref(), bytes.as_ref())?;
    }
    builder.finish()
}
