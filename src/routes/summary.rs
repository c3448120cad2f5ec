use axum::{
    extract::{Multipart, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::pages;
use crate::{
    error::AppError,
    models::SummaryReport,
    services::{self, export},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let api = Router::new()
        .route("/api/summary", post(api_summary))
        .layer(cors);

    Router::new()
        .route("/", get(index))
        .route("/summary", post(summary_page))
        .route("/summary/csv", post(summary_csv))
        .route("/summary/download", post(download_csv))
        .merge(api)
}

#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub data: Bytes,
}

/// Pulls the `file` field out of the form and checks it is an `.xlsx` upload.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.to_lowercase().ends_with(".xlsx") {
            tracing::error!("Unsupported file: {:?}", file_name);
            return Err(AppError::InvalidInput("Only XLSX files are supported".to_string()));
        }

        let data = field.bytes().await?;
        tracing::info!("Received {} ({}KB)", file_name, data.len() / 1024);
        return Ok(Upload { file_name, data });
    }

    Err(AppError::InvalidInput("No file provided".to_string()))
}

async fn process_upload(multipart: Multipart) -> Result<SummaryReport, AppError> {
    let upload = read_upload(multipart).await?;
    let start = std::time::Instant::now();

    let report = tokio::task::spawn_blocking(move || services::summarize_upload(upload.data))
        .await
        .map_err(|e| AppError::Internal(format!("Summary task failed: {}", e)))??;

    tracing::info!(
        "Processed {}: {} sheets, {} rows, {} cashiers in {:?}",
        upload.file_name,
        report.sheet_count,
        report.row_count,
        report.summary.len(),
        start.elapsed()
    );
    Ok(report)
}

fn csv_attachment(body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, export::CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::CSV_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response()
}

/// Renders failures of the HTML flow as a page rather than JSON.
pub struct HtmlError(AppError);

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        HtmlError(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        tracing::warn!("Upload failed: {}", self.0);
        (status, Html(pages::error_page(&self.0.to_string()))).into_response()
    }
}

async fn index() -> Html<String> {
    Html(pages::upload_page())
}

async fn summary_page(multipart: Multipart) -> Result<Html<String>, HtmlError> {
    let report = process_upload(multipart).await?;
    let csv = export::to_csv(&report.summary)?;
    let csv = String::from_utf8(csv)
        .map_err(|e| AppError::Internal(format!("CSV is not UTF-8: {}", e)))?;
    Ok(Html(pages::summary_page(&report.summary, &csv)))
}

async fn summary_csv(multipart: Multipart) -> Result<Response, AppError> {
    let report = process_upload(multipart).await?;
    Ok(csv_attachment(export::to_csv(&report.summary)?))
}

#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    csv: String,
}

/// Parses the posted CSV and writes it out again, so record terminators come
/// back as LF while line breaks inside quoted values are kept as sent.
async fn download_csv(Form(form): Form<DownloadForm>) -> Result<Response, AppError> {
    let summary = export::from_csv(form.csv.as_bytes())
        .map_err(|e| AppError::InvalidInput(format!("Malformed summary CSV: {}", e)))?;
    Ok(csv_attachment(export::to_csv(&summary)?))
}

async fn api_summary(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SummaryReport>), AppError> {
    tracing::debug!("API upload, limit {} bytes", state.config.max_file_size);
    let report = process_upload(multipart).await?;
    Ok((StatusCode::OK, Json(report)))
}
