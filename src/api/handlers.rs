use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::database::repositories::{PriceRepository, VersionRepository};
use crate::jobs::IngestionJob;
use crate::market_data::PriceFetcher;

use super::responses::*;

/// Shared application state
///
/// Everything is wired explicitly in `main` (or in tests) and cloned into
/// each handler.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PriceFetcher>,
    pub price_repository: Arc<dyn PriceRepository>,
    pub version_repository: Arc<dyn VersionRepository>,
    pub ingestion_job: Arc<IngestionJob>,
    pub store_backend: StoreBackend,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store_backend,
        timestamp: Utc::now(),
    })
}
