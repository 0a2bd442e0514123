use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stock price entity - one persisted trading day for a ticker
///
/// Only the (ticker, date) pair is kept; OHLCV values stay with the provider.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::database::schema::stock_prices)]
#[diesel(primary_key(ticker, price_date))]
pub struct StockPrice {
    /// Ticker symbol (e.g., "AAPL")
    pub ticker: String,

    /// Trading day (YYYY-MM-DD)
    #[schema(value_type = String, example = "2024-01-03")]
    pub price_date: NaiveDate,

    /// Timestamp when record was inserted
    pub created_at: DateTime<Utc>,
}

/// New stock price for insertion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::stock_prices)]
pub struct NewStockPrice {
    pub ticker: String,
    pub price_date: NaiveDate,
}

impl NewStockPrice {
    pub fn new(ticker: impl Into<String>, price_date: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            price_date,
        }
    }
}
