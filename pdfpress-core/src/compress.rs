//! Metadata stripping and object-stream re-serialization.

use crate::error::{PressError, Result};
use crate::metadata::clear_metadata;
use crate::options::CompressOptions;
use lopdf::{Document, Object, SaveOptions};
use std::path::Path;
use tracing::{debug, warn};

/// Compress the PDF stored at `path`.
pub fn compress_file(path: &Path, options: &CompressOptions) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    compress_bytes(&bytes, options)
}

/// Load `bytes` as a PDF, blank its descriptive metadata and serialize it
/// again with object and cross-reference streams.
///
/// Encrypted inputs that open with the empty user password are decrypted by
/// the loader and written back without encryption. Inputs that need a user
/// password fail with [`PressError::InvalidDocument`].
pub fn compress_bytes(bytes: &[u8], options: &CompressOptions) -> Result<Vec<u8>> {
    debug!(
        level = %options.level,
        max_mb = ?options.max_mb,
        input_bytes = bytes.len(),
        "compressing document"
    );

    let mut doc = Document::load_mem(bytes)?;
    if doc.is_encrypted() {
        if doc.encryption_state.take().is_none() {
            return Err(PressError::InvalidDocument(
                "encrypted document requires a password".to_string(),
            ));
        }
        remove_encryption(&mut doc);
        warn!("encrypted document opened with the empty user password, saving it unencrypted");
    }

    clear_metadata(&mut doc)?;

    let save_options = SaveOptions::builder()
        .use_object_streams(true)
        .use_xref_streams(true)
        .build();

    let mut output = Vec::with_capacity(bytes.len());
    doc.save_with_options(&mut output, save_options)?;

    debug!(
        input_bytes = bytes.len(),
        output_bytes = output.len(),
        "document compressed"
    );
    Ok(output)
}

// Objects are plaintext after a successful load and the writer never
// encrypts, so /Encrypt must not be written back.
fn remove_encryption(doc: &mut Document) {
    if let Some(Object::Reference(id)) = doc.trailer.remove(b"Encrypt") {
        doc.objects.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::read_metadata;
    use pdfpress_test_suite::generators::{invalid_pdfs, TestPdfBuilder};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn report_pdf() -> Vec<u8> {
        TestPdfBuilder::new()
            .with_pages(2)
            .with_title("Q1 Report")
            .with_author("Finance")
            .with_subject("Quarterly numbers")
            .with_keywords("q1, revenue")
            .with_creator("Spreadsheet")
            .with_producer("Writer 3.1")
            .build()
    }

    #[test]
    fn test_compress_bytes_clears_metadata() {
        let output = compress_bytes(&report_pdf(), &CompressOptions::default()).unwrap();

        assert!(output.starts_with(b"%PDF-"));
        let doc = Document::load_mem(&output).unwrap();
        assert!(read_metadata(&doc).is_cleared());
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_compress_bytes_writes_object_streams() {
        let output = compress_bytes(&report_pdf(), &CompressOptions::default()).unwrap();
        let text = String::from_utf8_lossy(&output);
        assert!(text.contains("/ObjStm"), "expected an object stream");
        assert!(text.contains("/XRef"), "expected a cross-reference stream");
    }

    #[test]
    fn test_compress_bytes_is_idempotent_for_metadata() {
        let options = CompressOptions::default();
        let once = compress_bytes(&report_pdf(), &options).unwrap();
        let twice = compress_bytes(&once, &options).unwrap();

        let first = read_metadata(&Document::load_mem(&once).unwrap());
        let second = read_metadata(&Document::load_mem(&twice).unwrap());
        assert_eq!(first, second);
        assert!(second.is_cleared());
    }

    #[test]
    fn test_compress_bytes_ignores_level_and_max_mb() {
        let baseline = compress_bytes(&report_pdf(), &CompressOptions::default()).unwrap();
        let hinted = compress_bytes(
            &report_pdf(),
            &CompressOptions::default()
                .with_level("high")
                .with_max_mb(Some(0.01)),
        )
        .unwrap();

        let baseline = Document::load_mem(&baseline).unwrap();
        let hinted = Document::load_mem(&hinted).unwrap();
        assert_eq!(read_metadata(&baseline), read_metadata(&hinted));
        assert_eq!(baseline.get_pages().len(), hinted.get_pages().len());
    }

    #[test]
    fn test_compress_bytes_without_info_dictionary() {
        let input = TestPdfBuilder::new().without_info().build();
        let output = compress_bytes(&input, &CompressOptions::default()).unwrap();
        let doc = Document::load_mem(&output).unwrap();
        assert!(read_metadata(&doc).is_cleared());
    }

    #[test]
    fn test_compress_bytes_rejects_garbage() {
        let err = compress_bytes(&invalid_pdfs::not_a_pdf(), &CompressOptions::default())
            .unwrap_err();
        assert!(matches!(err, PressError::Pdf(_)));
    }

    #[test]
    fn test_compress_bytes_rejects_empty_and_images() {
        let options = CompressOptions::default();
        assert!(compress_bytes(&invalid_pdfs::empty(), &options).is_err());
        assert!(compress_bytes(&invalid_pdfs::png_signature(), &options).is_err());
    }

    #[test]
    fn test_compress_bytes_decrypts_owner_protected_document() {
        let input = TestPdfBuilder::new()
            .with_pages(2)
            .with_title("Locked Report")
            .with_encryption("owner", "")
            .build();

        let output = compress_bytes(&input, &CompressOptions::default()).unwrap();

        let doc = Document::load_mem(&output).unwrap();
        assert!(!doc.is_encrypted());
        assert_eq!(doc.get_pages().len(), 2);
        assert_eq!(doc.extract_text(&[1]).unwrap(), "Test page 1\n");
        assert!(read_metadata(&doc).is_cleared());
    }

    #[test]
    fn test_compress_bytes_rejects_password_protected_document() {
        let input = TestPdfBuilder::new()
            .with_title("Locked Report")
            .with_encryption("owner", "user")
            .build();

        let err = compress_bytes(&input, &CompressOptions::default()).unwrap_err();
        assert!(matches!(err, PressError::InvalidDocument(_)));
    }

    #[test]
    fn test_compress_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&report_pdf()).unwrap();

        let output = compress_file(file.path(), &CompressOptions::default()).unwrap();
        let doc = Document::load_mem(&output).unwrap();
        assert!(read_metadata(&doc).is_cleared());
    }

    #[test]
    fn test_compress_file_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = compress_file(&dir.path().join("absent.pdf"), &CompressOptions::default())
            .unwrap_err();
        assert!(matches!(err, PressError::Io(_)));
    }
}
