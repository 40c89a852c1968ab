//! Test Suite for pdfpress
//!
//! Shared fixtures for the core, API and CLI tests: small generated PDFs
//! with known metadata, inputs that must fail to load, and multipart request
//! bodies.

pub mod generators;
pub mod multipart;

pub use generators::{invalid_pdfs, PdfVersion, TestPdfBuilder};
pub use multipart::MultipartBuilder;

/// Common test utilities
pub mod utils {
    use std::path::Path;

    /// Write `bytes` to `dir/name` and return the full path
    pub fn write_fixture<P: AsRef<Path>>(
        dir: P,
        name: &str,
        bytes: &[u8],
    ) -> anyhow::Result<std::path::PathBuf> {
        let path = dir.as_ref().join(name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}
