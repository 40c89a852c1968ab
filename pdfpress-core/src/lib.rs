//! # pdfpress
//!
//! Shrink PDF files by stripping descriptive metadata and re-saving them with
//! object-stream packing, and bundle several results into one ZIP archive.
//!
//! ## Features
//!
//! - **Metadata stripping**: blank `Title`, `Author`, `Subject`, `Keywords`,
//!   `Producer` and `Creator` in the document information dictionary
//! - **Structural compression**: re-serialize with object streams and
//!   cross-reference streams
//! - **Batch archives**: stream several compressed documents into a ZIP
//!   without seeking or buffering the whole archive
//!
//! The PDF object model comes from [`lopdf`]; no page content, images or
//! fonts are rewritten.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfpress::{compress_file, output_name, CompressOptions};
//! use std::path::Path;
//!
//! # fn main() -> pdfpress::Result<()> {
//! let bytes = compress_file(Path::new("report.pdf"), &CompressOptions::default())?;
//! std::fs::write(output_name("report.pdf"), bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Batches
//!
//! ```rust,no_run
//! use pdfpress::{compress_file, output_name, ArchiveWriter, CompressOptions};
//! use std::fs::File;
//! use std::path::Path;
//!
//! # fn main() -> pdfpress::Result<()> {
//! let options = CompressOptions::default();
//! let mut archive = ArchiveWriter::new(File::create("compressed_pdfs.zip")?);
//! for name in ["a.pdf", "b.pdf"] {
//!     let bytes = compress_file(Path::new(name), &options)?;
//!     archive.append(&output_name(name), &bytes)?;
//! }
//! archive.finish()?;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod compress;
pub mod error;
pub mod metadata;
pub mod options;

pub use archive::{output_name, ArchiveWriter, ARCHIVE_NAME};
pub use compress::{compress_bytes, compress_file};
pub use error::{PressError, Result};
pub use metadata::{
    clear_metadata, inspect_file, read_metadata, DocumentMetadata, DocumentSummary, CLEARED_FIELDS,
};
pub use options::{CompressOptions, DEFAULT_LEVEL};

/// Current version of pdfpress
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
