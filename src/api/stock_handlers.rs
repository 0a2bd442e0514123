use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::database::models::StockPrice;
use crate::market_data::FetchError;

use super::errors::ApiError;
use super::handlers::AppState;
use super::responses::ErrorResponse;

/// Query parameters for the stock data lookup
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockDataParams {
    /// Ticker symbol (e.g., AAPL)
    pub ticker: String,
    /// Number of trading days to return
    #[serde(default = "default_timeseries")]
    pub timeseries: u32,
}

fn default_timeseries() -> u32 {
    3
}

/// Get recent daily prices straight from the provider
///
/// Returns the provider's `historical` array unmodified.
#[utoipa::path(
    get,
    path = "/api/stockData",
    tag = "Stock Data",
    params(StockDataParams),
    responses(
        (status = 200, description = "Provider `historical` array, newest first", content_type = "application/json"),
        (status = 400, description = "Invalid ticker or timeseries", body = ErrorResponse),
        (status = 502, description = "Price provider failed", body = ErrorResponse)
    )
)]
pub async fn get_stock_data(
    State(state): State<AppState>,
    Query(params): Query<StockDataParams>,
) -> Result<Json<Value>, ApiError> {
    let record_set = state
        .fetcher
        .fetch_historical(&params.ticker, params.timeseries)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch stock data for {}: {}", params.ticker, e);
            ApiError::from(e)
        })?;

    let historical = record_set.historical().cloned().ok_or_else(|| {
        tracing::error!("Provider response for {} has no historical array", params.ticker);
        ApiError::from(FetchError::MissingHistorical {
            ticker: params.ticker.clone(),
        })
    })?;

    Ok(Json(Value::Array(historical)))
}

/// Get persisted price points for a ticker
#[utoipa::path(
    get,
    path = "/api/prices/{ticker}",
    tag = "Stock Data",
    params(
        ("ticker" = String, Path, description = "Ticker symbol")
    ),
    responses(
        (status = 200, description = "Stored price points, newest first", body = Vec<StockPrice>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_stored_prices(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<Vec<StockPrice>>, ApiError> {
    state
        .price_repository
        .find_by_ticker(&ticker)
        .map(Json)
        .map_err(|e| {
            tracing::error!("Failed to load stored prices for {}: {}", ticker, e);
            ApiError::from(e)
        })
}
