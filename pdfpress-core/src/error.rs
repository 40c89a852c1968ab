use thiserror::Error;

#[derive(Error, Debug)]
pub enum PressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, PressError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_press_error_display() {
        let error = PressError::InvalidDocument("missing trailer".to_string());
        assert_eq!(error.to_string(), "Invalid document: missing trailer");
    }

    #[test]
    fn test_press_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let error = PressError::from(io_error);

        match error {
            PressError::Io(ref err) => assert_eq!(err.kind(), ErrorKind::NotFound),
            _ => panic!("Expected IO error variant"),
        }
        assert!(error.to_string().starts_with("IO error:"));
    }

    #[test]
    fn test_press_error_from_archive_error() {
        let zip_error = zip::result::ZipError::FileNotFound;
        let error = PressError::from(zip_error);
        assert!(matches!(error, PressError::Archive(_)));
        assert!(error.to_string().starts_with("Archive error:"));
    }

    #[test]
    fn test_press_error_from_pdf_error() {
        let pdf_error = lopdf::Document::load_mem(b"definitely not a pdf").unwrap_err();
        let error = PressError::from(pdf_error);
        assert!(matches!(error, PressError::Pdf(_)));
        assert!(error.to_string().starts_with("PDF error:"));
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<i32> = Err(PressError::InvalidDocument("test".to_string()));
        match result.unwrap_err() {
            PressError::InvalidDocument(msg) => assert_eq!(msg, "test"),
            _ => panic!("Expected InvalidDocument variant"),
        }
    }
}
