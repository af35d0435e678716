use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument};

use crate::{
    bias::{
        catalog,
        dto::{AnalyzeResponse, FormatResponse, HealthResponse},
        services::now_millis,
    },
    errors::AnalysisError,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/bias/health", get(health))
        .route("/bias/format/:industry", get(industry_format))
}

pub fn write_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/bias/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        service: "BiasMeter AI API",
        version: "1.0.0",
        message: "Ready to analyze bias in AI systems",
        timestamp: now_millis(),
    })
}

/// Uploaded file as received; only its name and size are used.
struct UploadItem {
    file_name: String,
    body: Bytes,
}

/// POST /api/bias/analyze (multipart)
/// Fields: `file` (the dataset) and `industry`.
#[instrument(skip(state, mp))]
pub async fn analyze(
    State(state): State<AppState>,
    mp: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AnalysisError> {
    let mut mp = mp?;
    let mut upload: Option<UploadItem> = None;
    let mut industry: Option<String> = None;

    while let Some(field) = mp.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let body = field.bytes().await?;
                upload = Some(UploadItem { file_name, body });
            }
            Some("industry") => industry = Some(field.text().await?),
            _ => {}
        }
    }

    let upload = upload.ok_or(AnalysisError::MissingField("file"))?;
    let industry = industry.ok_or(AnalysisError::MissingField("industry"))?;
    let file_size = upload.body.len() as u64;

    info!(file_name = %upload.file_name, %industry, file_size, "received file for analysis");

    let report = state.analyzer.analyze(&industry, file_size);

    info!(%industry, bias_score = report.bias_score, status = ?report.status, "analysis completed");
    Ok(Json(AnalyzeResponse {
        report,
        file_name: upload.file_name,
        file_size,
        industry,
        analysis_time: now_millis(),
    }))
}

pub async fn industry_format(Path(industry): Path<String>) -> Json<FormatResponse> {
    Json(FormatResponse {
        format: catalog::format(&industry),
        description: catalog::description(&industry),
        industry,
    })
}
