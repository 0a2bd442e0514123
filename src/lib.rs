// Library Crate Root
// lib.rs

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod database;
pub mod jobs;
pub mod market_data;

pub use api::{create_router, AppState};
pub use config::{AppConfig, ConfigError};
pub use jobs::{IngestionJob, IngestionReport, IngestionScheduler};
pub use market_data::{FetchError, HistoricalPriceClient, PriceFetcher, PriceRecordSet};
