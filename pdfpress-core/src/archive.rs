//! Streaming ZIP output for batches of compressed documents.

use crate::error::Result;
use std::collections::HashSet;
use std::io::Write;
use zip::write::{SimpleFileOptions, StreamWriter};
use zip::{CompressionMethod, ZipWriter};

/// File name suggested for a batch download.
pub const ARCHIVE_NAME: &str = "compressed_pdfs.zip";

const OUTPUT_PREFIX: &str = "compressed_";
const DEFLATE_LEVEL: i64 = 9;

/// Name given to the compressed copy of `original`.
pub fn output_name(original: &str) -> String {
    format!("{OUTPUT_PREFIX}{original}")
}

/// Writes ZIP entries straight into a non-seekable sink.
///
/// Bytes reach `W` as each entry is written; nothing is held back until
/// [`ArchiveWriter::finish`] apart from the central directory. ZIP entry
/// names must be unique, so a repeated name gets a ` (n)` suffix before its
/// extension.
pub struct ArchiveWriter<W: Write> {
    zip: ZipWriter<StreamWriter<W>>,
    names: HashSet<String>,
}

impl<W: Write> ArchiveWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            zip: ZipWriter::new_stream(sink),
            names: HashSet::new(),
        }
    }

    /// Append one deflated entry, returning the name it was stored under.
    pub fn append(&mut self, name: &str, data: &[u8]) -> Result<String> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(DEFLATE_LEVEL));

        let stored = self.unique_name(name);
        self.zip.start_file(stored.as_str(), options)?;
        self.zip.write_all(data)?;
        self.names.insert(stored.clone());
        Ok(stored)
    }

    pub fn entries(&self) -> usize {
        self.names.len()
    }

    fn unique_name(&self, name: &str) -> String {
        if !self.names.contains(name) {
            return name.to_string();
        }
        let (stem, ext) = match name.rfind('.') {
            Some(dot) if dot > 0 => name.split_at(dot),
            _ => (name, ""),
        };
        (2..)
            .map(|n| format!("{stem} ({n}){ext}"))
            .find(|candidate| !self.names.contains(candidate))
            .unwrap_or_else(|| name.to_string())
    }

    /// Write the central directory and flush the sink.
    pub fn finish(self) -> Result<()> {
        let mut sink = self.zip.finish()?;
        sink.flush()?;
        Ok(())
    }
}
