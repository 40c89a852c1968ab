//! Test PDF Builder
//!
//! A builder for creating test PDFs with specific characteristics.

use lopdf::content::{Content, Operation};
use lopdf::{
    dictionary, Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream,
    StringFormat,
};

/// PDF version to generate
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum PdfVersion {
    V1_4,
    V1_5,
    V1_7,
}

impl std::fmt::Display for PdfVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let version = match self {
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_5 => "1.5",
            PdfVersion::V1_7 => "1.7",
        };
        write!(f, "{version}")
    }
}

/// Builder for creating test PDFs
pub struct TestPdfBuilder {
    version: PdfVersion,
    pages: usize,
    info: Vec<(String, String)>,
    include_info: bool,
    passwords: Option<(String, String)>,
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPdfBuilder {
    /// Create a new PDF builder with one text page and an empty Info dictionary
    pub fn new() -> Self {
        Self {
            version: PdfVersion::V1_4,
            pages: 1,
            info: Vec::new(),
            include_info: true,
            passwords: None,
        }
    }

    /// Set PDF version
    pub fn with_version(mut self, version: PdfVersion) -> Self {
        self.version = version;
        self
    }

    /// Number of text pages
    pub fn with_pages(mut self, pages: usize) -> Self {
        self.pages = pages.max(1);
        self
    }

    /// Add document info
    pub fn with_info(mut self, key: &str, value: &str) -> Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_title(self, title: &str) -> Self {
        self.with_info("Title", title)
    }

    pub fn with_author(self, author: &str) -> Self {
        self.with_info("Author", author)
    }

    pub fn with_subject(self, subject: &str) -> Self {
        self.with_info("Subject", subject)
    }

    pub fn with_keywords(self, keywords: &str) -> Self {
        self.with_info("Keywords", keywords)
    }

    pub fn with_creator(self, creator: &str) -> Self {
        self.with_info("Creator", creator)
    }

    pub fn with_producer(self, producer: &str) -> Self {
        self.with_info("Producer", producer)
    }

    /// Leave the trailer without an `/Info` entry
    pub fn without_info(mut self) -> Self {
        self.include_info = false;
        self
    }

    /// Encrypt the output with 128-bit RC4 (V2). An empty `user` password
    /// lets readers open the file without prompting.
    pub fn with_encryption(mut self, owner: &str, user: &str) -> Self {
        self.passwords = Some((owner.to_string(), user.to_string()));
        self
    }

    /// Build the PDF, panicking on serialization failure
    pub fn build(self) -> Vec<u8> {
        self.try_build().expect("test PDF should serialize")
    }

    /// Build the PDF
    pub fn try_build(self) -> anyhow::Result<Vec<u8>> {
        let mut doc = Document::with_version(self.version.to_string());
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages);
        for number in 1..=self.pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::string_literal(format!("Test page {number}"))],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.pages as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if self.include_info {
            let mut info = lopdf::Dictionary::new();
            for (key, value) in &self.info {
                info.set(key.as_str(), Object::string_literal(value.as_str()));
            }
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        if let Some((owner, user)) = &self.passwords {
            let file_id = Object::String(b"pdfpress-fixture".to_vec(), StringFormat::Hexadecimal);
            doc.trailer.set("ID", vec![file_id.clone(), file_id]);
            let state = EncryptionState::try_from(EncryptionVersion::V2 {
                document: &doc,
                owner_password: owner,
                user_password: user,
                key_length: 128,
                permissions: Permissions::default(),
            })?;
            doc.encrypt(&state)?;
        }

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}
