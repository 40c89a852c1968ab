use crate::config::ServerConfig;
use crate::error::AppError;
use crate::stream::zip_body;
use crate::upload::{UploadError, UploadForm, UploadedFile};
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Json, Multipart},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use pdfpress::{compress_file, output_name, CompressOptions, ARCHIVE_NAME};
use tower_http::trace::TraceLayer;
use tracing::info;

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Form(err.to_string())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(err: MultipartRejection) -> Self {
        AppError::Form(err.body_text())
    }
}

/// Build the application router with default settings
pub fn app() -> Router {
    router(&ServerConfig::default())
}

/// Build the application router with all routes configured
pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route(
            "/api/compress",
            post(compress_handler).fallback(method_not_allowed),
        )
        .route("/api/health", get(health_check))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes()))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pdfpress API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Rejects every method other than `POST` on the upload route
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Strip metadata from the uploaded PDFs and return them repacked.
///
/// One file comes back as `application/pdf`; two or more come back as a
/// streamed `application/zip` with one `compressed_<name>` entry per upload.
pub async fn compress_handler(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let UploadForm { mut files, options } = UploadForm::from_multipart(multipart?).await?;

    info!(
        files = files.len(),
        level = %options.level,
        max_mb = ?options.max_mb,
        "compression requested"
    );

    match files.len() {
        0 => Err(AppError::NoFiles),
        1 => single_file_response(files.remove(0), options).await,
        _ => archive_response(files, options).await,
    }
}

async fn single_file_response(
    file: UploadedFile,
    options: CompressOptions,
) -> Result<Response, AppError> {
    let name = output_name(&file.original_filename);
    let pdf_bytes = tokio::task::spawn_blocking(move || compress_file(file.path(), &options)).await??;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, attachment(&name)),
        ],
        pdf_bytes,
    )
        .into_response())
}

async fn archive_response(
    files: Vec<UploadedFile>,
    options: CompressOptions,
) -> Result<Response, AppError> {
    // Fail with a JSON error, not a broken download, if the first file is bad.
    let first_path = files[0].path().to_path_buf();
    let first_options = options.clone();
    let first =
        tokio::task::spawn_blocking(move || compress_file(&first_path, &first_options)).await??;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/zip")),
            (header::CONTENT_DISPOSITION, attachment(ARCHIVE_NAME)),
        ],
        zip_body(files, first, options),
    )
        .into_response())
}

fn attachment(filename: &str) -> HeaderValue {
    let safe: String = filename
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    HeaderValue::from_bytes(format!("attachment; filename=\"{safe}\"").as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
