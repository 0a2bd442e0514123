use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::jobs::IngestionReport;

/// Which store backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: StoreBackend,
    pub timestamp: DateTime<Utc>,
}

/// Ingestion job status
#[derive(Debug, Serialize, ToSchema)]
pub struct IngestionStatusResponse {
    /// True while a run is in flight
    pub running: bool,
    /// Trading days requested per ticker
    pub days: u32,
    pub last_report: Option<IngestionReport>,
}

/// Error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
