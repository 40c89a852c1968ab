//! # pdfpress-api
//!
//! HTTP upload endpoint for the pdfpress library.
//!
//! `POST /api/compress` takes `multipart/form-data` with one or more `file`
//! parts and optional `level` and `maxMb` fields. A single upload comes back
//! as the compressed PDF; several come back as a streamed ZIP archive.

mod api;
pub mod config;
pub mod error;
pub mod stream;
pub mod upload;

pub use api::{app, compress_handler, health_check, method_not_allowed, router};
pub use config::ServerConfig;
pub use error::{AppError, ErrorResponse};
pub use upload::{UploadForm, UploadedFile};
