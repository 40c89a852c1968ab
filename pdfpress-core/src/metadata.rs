//! Document information dictionary access.
//!
//! PDF keeps its human-readable metadata in the `/Info` dictionary referenced
//! from the trailer. Stripping replaces the six descriptive entries with empty
//! strings, the same effect as setting them to `""` through a document API,
//! so readers see the keys but no content.

use crate::error::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

/// Info entries blanked by [`clear_metadata`].
pub const CLEARED_FIELDS: [&str; 6] = [
    "Title", "Author", "Subject", "Keywords", "Producer", "Creator",
];

/// Descriptive metadata read from a document's `/Info` dictionary.
///
/// `None` means the entry is absent; `Some("")` means present but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub producer: Option<String>,
    pub creator: Option<String>,
}

impl DocumentMetadata {
    /// True when all six fields are present and empty.
    pub fn is_cleared(&self) -> bool {
        self.fields()
            .iter()
            .all(|(_, value)| value.is_some_and(str::is_empty))
    }

    /// Field name and value pairs, in [`CLEARED_FIELDS`] order.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("Title", self.title.as_deref()),
            ("Author", self.author.as_deref()),
            ("Subject", self.subject.as_deref()),
            ("Keywords", self.keywords.as_deref()),
            ("Producer", self.producer.as_deref()),
            ("Creator", self.creator.as_deref()),
        ]
    }
}

/// Overview of a PDF file, as printed by `pdfpress info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub version: String,
    pub pages: usize,
    pub encrypted: bool,
    pub metadata: DocumentMetadata,
}

/// Load the PDF at `path` and summarize it.
pub fn inspect_file(path: &Path) -> Result<DocumentSummary> {
    let bytes = std::fs::read(path)?;
    let doc = Document::load_mem(&bytes)?;
    Ok(DocumentSummary {
        version: doc.version.clone(),
        pages: doc.get_pages().len(),
        encrypted: doc.is_encrypted(),
        metadata: read_metadata(&doc),
    })
}

enum InfoSlot {
    Indirect(ObjectId),
    Direct,
    Missing,
}

fn locate_info(doc: &Document) -> InfoSlot {
    match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) if doc.get_dictionary(*id).is_ok() => InfoSlot::Indirect(*id),
        Ok(Object::Dictionary(_)) => InfoSlot::Direct,
        _ => InfoSlot::Missing,
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match locate_info(doc) {
        InfoSlot::Indirect(id) => doc.get_dictionary(id).ok(),
        InfoSlot::Direct => doc.trailer.get(b"Info").and_then(Object::as_dict).ok(),
        InfoSlot::Missing => None,
    }
}

/// Read the descriptive metadata of `doc`.
pub fn read_metadata(doc: &Document) -> DocumentMetadata {
    let Some(info) = info_dictionary(doc) else {
        return DocumentMetadata::default();
    };

    let field = |key: &[u8]| {
        info.get(key)
            .ok()
            .and_then(|obj| resolve(doc, obj))
            .and_then(decode_text_string)
    };

    DocumentMetadata {
        title: field(b"Title"),
        author: field(b"Author"),
        subject: field(b"Subject"),
        keywords: field(b"Keywords"),
        producer: field(b"Producer"),
        creator: field(b"Creator"),
    }
}

/// Blank the six descriptive `/Info` entries of `doc`.
///
/// A document without a usable `/Info` dictionary gets a fresh indirect one
/// linked from the trailer. Entries outside [`CLEARED_FIELDS`] are kept.
pub fn clear_metadata(doc: &mut Document) -> Result<()> {
    let info = match locate_info(doc) {
        InfoSlot::Indirect(id) => doc.get_object_mut(id)?.as_dict_mut()?,
        InfoSlot::Direct => doc.trailer.get_mut(b"Info")?.as_dict_mut()?,
        InfoSlot::Missing => {
            let id = doc.add_object(Dictionary::new());
            doc.trailer.set("Info", Object::Reference(id));
            doc.get_object_mut(id)?.as_dict_mut()?
        }
    };

    for key in CLEARED_FIELDS {
        info.set(key, Object::string_literal(""));
    }
    Ok(())
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn decode_text_string(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => {
            if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
                let units: Vec<u16> = utf16
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).ok()
            } else {
                match std::str::from_utf8(bytes) {
                    Ok(s) => Some(s.to_string()),
                    Err(_) => Some(bytes.iter().map(|&b| b as char).collect()),
                }
            }
        }
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, StringFormat};
    use pdfpress_test_suite::generators::TestPdfBuilder;
    use pretty_assertions::assert_eq;

    fn load(bytes: &[u8]) -> Document {
        Document::load_mem(bytes).unwrap()
    }

    #[test]
    fn test_read_metadata_from_indirect_info() {
        let bytes = TestPdfBuilder::new()
            .with_title("Q1 Report")
            .with_author("Finance")
            .with_producer("Writer 3.1")
            .build();
        let meta = read_metadata(&load(&bytes));

        assert_eq!(meta.title.as_deref(), Some("Q1 Report"));
        assert_eq!(meta.author.as_deref(), Some("Finance"));
        assert_eq!(meta.producer.as_deref(), Some("Writer 3.1"));
        assert_eq!(meta.subject, None);
        assert!(!meta.is_cleared());
    }

    #[test]
    fn test_read_metadata_without_info() {
        let bytes = TestPdfBuilder::new().without_info().build();
        let meta = read_metadata(&load(&bytes));
        assert_eq!(meta, DocumentMetadata::default());
        assert!(!meta.is_cleared());
    }

    #[test]
    fn test_read_metadata_decodes_utf16() {
        let mut doc = load(&TestPdfBuilder::new().without_info().build());
        let mut title = vec![0xFE, 0xFF];
        for unit in "Überblick".encode_utf16() {
            title.extend_from_slice(&unit.to_be_bytes());
        }
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(title, StringFormat::Hexadecimal),
        });
        doc.trailer.set("Info", Object::Reference(info_id));

        assert_eq!(read_metadata(&doc).title.as_deref(), Some("Überblick"));
    }

    #[test]
    fn test_clear_metadata_blanks_all_fields() {
        let bytes = TestPdfBuilder::new()
            .with_title("Q1 Report")
            .with_author("Finance")
            .with_subject("Quarterly numbers")
            .with_keywords("q1, revenue")
            .with_creator("Spreadsheet")
            .with_producer("Writer 3.1")
            .build();
        let mut doc = load(&bytes);

        clear_metadata(&mut doc).unwrap();

        let meta = read_metadata(&doc);
        assert!(meta.is_cleared());
        assert_eq!(meta.title.as_deref(), Some(""));
    }

    #[test]
    fn test_clear_metadata_keeps_other_entries() {
        let bytes = TestPdfBuilder::new()
            .with_title("Draft")
            .with_info("CreationDate", "D:20240101000000Z")
            .build();
        let mut doc = load(&bytes);

        clear_metadata(&mut doc).unwrap();

        let info = info_dictionary(&doc).unwrap();
        assert_eq!(
            info.get(b"CreationDate").and_then(Object::as_str).unwrap(),
            b"D:20240101000000Z"
        );
    }

    #[test]
    fn test_clear_metadata_creates_missing_info() {
        let mut doc = load(&TestPdfBuilder::new().without_info().build());
        assert!(matches!(locate_info(&doc), InfoSlot::Missing));

        clear_metadata(&mut doc).unwrap();

        assert!(matches!(locate_info(&doc), InfoSlot::Indirect(_)));
        assert!(read_metadata(&doc).is_cleared());
    }

    #[test]
    fn test_clear_metadata_direct_info() {
        let mut doc = load(&TestPdfBuilder::new().without_info().build());
        doc.trailer.set(
            "Info",
            dictionary! { "Title" => Object::string_literal("Inline") },
        );

        clear_metadata(&mut doc).unwrap();

        assert!(matches!(locate_info(&doc), InfoSlot::Direct));
        assert!(read_metadata(&doc).is_cleared());
    }

    #[test]
    fn test_inspect_file() {
        let bytes = TestPdfBuilder::new()
            .with_pages(3)
            .with_title("Q1 Report")
            .build();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &bytes).unwrap();

        let summary = inspect_file(file.path()).unwrap();
        assert_eq!(summary.version, "1.4");
        assert_eq!(summary.pages, 3);
        assert!(!summary.encrypted);
        assert_eq!(summary.metadata.title.as_deref(), Some("Q1 Report"));
    }

    #[test]
    fn test_clear_metadata_replaces_dangling_reference() {
        let mut doc = load(&TestPdfBuilder::new().without_info().build());
        doc.trailer.set("Info", Object::Reference((9999, 0)));

        clear_metadata(&mut doc).unwrap();

        assert!(read_metadata(&doc).is_cleared());
    }
}
