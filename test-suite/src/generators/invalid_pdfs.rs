//! Invalid PDF Generators
//!
//! Inputs that a PDF loader must reject.

/// Plain text with no PDF header
pub fn not_a_pdf() -> Vec<u8> {
    b"Quarterly report\n\nThis file was saved as text, not as a PDF document.\n".to_vec()
}

/// Zero-length upload
pub fn empty() -> Vec<u8> {
    Vec::new()
}

/// Bytes that look like an image rather than a document
pub fn png_signature() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}
