use axum::{
    extract::State,
    http::{header::HeaderName, HeaderValue},
    response::IntoResponse,
};

use super::errors::ApiError;
use super::handlers::AppState;
use super::responses::ErrorResponse;

/// Lets pages served from public origins call this API on a private network
pub const ALLOW_PRIVATE_NETWORK: HeaderName =
    HeaderName::from_static("access-control-allow-private-network");

/// Get the current version marker
///
/// Returns the greatest identifier as plain text.
#[utoipa::path(
    get,
    path = "/api/version",
    tag = "Version",
    responses(
        (status = 200, description = "Current version identifier", body = String, content_type = "text/plain"),
        (status = 404, description = "No version marker exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_version(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let version = state
        .version_repository
        .find_latest()
        .map_err(|e| {
            tracing::error!("Failed to load version marker: {}", e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound("No version marker found".to_string()))?;

    Ok((
        [(ALLOW_PRIVATE_NETWORK, HeaderValue::from_static("true"))],
        version.version_id,
    ))
}
