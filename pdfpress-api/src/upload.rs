//! Multipart form parsing for compression uploads.
//!
//! The whole body is read before any document is touched. File parts are
//! spooled to per-request temporary files so large uploads never sit in
//! memory; the files are removed when the [`UploadedFile`] is dropped.

use axum::extract::multipart::{Field, Multipart, MultipartError};
use pdfpress::CompressOptions;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub const FILE_FIELD: &str = "file";
pub const LEVEL_FIELD: &str = "level";
pub const MAX_MB_FIELD: &str = "maxMb";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),
}

/// One uploaded file part, stored on disk for the lifetime of the request.
#[derive(Debug)]
pub struct UploadedFile {
    pub original_filename: String,
    file: NamedTempFile,
}

impl UploadedFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn spool(original_filename: String, field: &mut Field<'_>) -> Result<Self, UploadError> {
        let temp = NamedTempFile::new()?;
        let mut sink = tokio::fs::File::from_std(temp.reopen()?);
        let mut written = 0usize;

        while let Some(chunk) = field.chunk().await? {
            sink.write_all(&chunk).await?;
            written += chunk.len();
        }
        sink.flush().await?;

        debug!(filename = %original_filename, bytes = written, "spooled upload");
        Ok(Self {
            original_filename,
            file: temp,
        })
    }
}

/// Parsed upload: files in submission order plus the scalar hints.
#[derive(Debug)]
pub struct UploadForm {
    pub files: Vec<UploadedFile>,
    pub options: CompressOptions,
}

impl UploadForm {
    /// Consume `multipart` completely.
    ///
    /// Parts named `file` that carry a non-empty filename become uploads.
    /// Parts without a filename are scalar fields; the first `level` and
    /// `maxMb` values are kept and anything else is skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, UploadError> {
        let mut files = Vec::new();
        let mut level: Option<String> = None;
        let mut max_mb: Option<String> = None;

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(filename) = field.file_name().map(str::to_string) {
                if name == FILE_FIELD && !filename.is_empty() {
                    files.push(UploadedFile::spool(filename, &mut field).await?);
                } else {
                    debug!(field = %name, "skipping file part");
                }
                continue;
            }

            let value = field.text().await?;
            match name.as_str() {
                LEVEL_FIELD if level.is_none() => level = Some(value),
                MAX_MB_FIELD if max_mb.is_none() => max_mb = Some(value),
                _ => {}
            }
        }

        Ok(Self {
            files,
            options: CompressOptions::from_form(level.as_deref(), max_mb.as_deref()),
        })
    }
}
