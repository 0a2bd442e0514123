use utoipa::OpenApi;

use crate::api::{handlers, ingestion_handlers, stock_handlers, version_handlers};
use crate::api::responses::*;
use crate::database::models::StockPrice;
use crate::jobs::{IngestionReport, TickerFailure};

/// OpenAPI specification
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stock Data API",
        version = "0.1.0",
        description = "Historical stock price proxy with scheduled ticker ingestion",
        license(
            name = "MIT"
        )
    ),
    paths(
        handlers::get_health,
        stock_handlers::get_stock_data,
        stock_handlers::get_stored_prices,
        version_handlers::get_version,
        ingestion_handlers::run_ingestion,
        ingestion_handlers::get_ingestion_status,
    ),
    components(
        schemas(
            StockPrice,
            StoreBackend,
            HealthResponse,
            IngestionReport,
            TickerFailure,
            IngestionStatusResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Stock Data", description = "Provider pass-through and stored price points"),
        (name = "Version", description = "Version marker lookup"),
        (name = "Ingestion", description = "Ticker ingestion job control"),
    )
)]
pub struct ApiDoc;
