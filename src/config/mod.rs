/// Configuration module
///
/// - Environment-driven application settings (`AppConfig`)
/// - The bundled ticker list resource consumed by the ingestion job

pub mod app_config;
pub mod errors;
pub mod ticker_list;

pub use app_config::{AppConfig, IngestionConfig, IngestionSchedule, PriceApiConfig};
pub use errors::ConfigError;
pub use ticker_list::TickerListLoader;
