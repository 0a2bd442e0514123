use axum::{extract::State, Json};

use crate::jobs::IngestionReport;

use super::errors::ApiError;
use super::handlers::AppState;
use super::responses::{ErrorResponse, IngestionStatusResponse};

/// Run ingestion now
///
/// Blocks until the run finishes and returns its report.
#[utoipa::path(
    post,
    path = "/api/ingestion/run",
    tag = "Ingestion",
    responses(
        (status = 200, description = "Run completed", body = IngestionReport),
        (status = 409, description = "A run is already in progress", body = ErrorResponse),
        (status = 500, description = "Ticker list unavailable", body = ErrorResponse)
    )
)]
pub async fn run_ingestion(
    State(state): State<AppState>,
) -> Result<Json<IngestionReport>, ApiError> {
    tracing::info!("Manual ingestion run requested");

    state
        .ingestion_job
        .run()
        .await
        .map(Json)
        .map_err(ApiError::from)
}

/// Get ingestion job status
#[utoipa::path(
    get,
    path = "/api/ingestion/status",
    tag = "Ingestion",
    responses(
        (status = 200, description = "Current job status", body = IngestionStatusResponse)
    )
)]
pub async fn get_ingestion_status(State(state): State<AppState>) -> Json<IngestionStatusResponse> {
    let job = &state.ingestion_job;

    Json(IngestionStatusResponse {
        running: job.is_running(),
        days: job.days(),
        last_report: job.last_report(),
    })
}
