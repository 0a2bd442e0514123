use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{get_health, AppState};
use super::ingestion_handlers::{get_ingestion_status, run_ingestion};
use super::openapi::ApiDoc;
use super::stock_handlers::{get_stock_data, get_stored_prices};
use super::version_handlers::get_version;

/// Create the API router with Swagger UI
pub fn create_router(state: AppState) -> Router {
    // Browser clients are served from arbitrary origins, including public
    // pages calling a service on a private network
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_private_network(true);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(get_health))
        // Provider pass-through
        .route("/api/stockData", get(get_stock_data))
        // Version marker
        .route("/api/version", get(get_version))
        // Stored price points
        .route("/api/prices/:ticker", get(get_stored_prices))
        // Ingestion control
        .route("/api/ingestion/run", post(run_ingestion))
        .route("/api/ingestion/status", get(get_ingestion_status))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
