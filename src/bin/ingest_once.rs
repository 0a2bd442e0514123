use std::sync::Arc;
use stock_data_api::bootstrap::{build_ingestion_job, initialize_repositories};
use stock_data_api::{AppConfig, HistoricalPriceClient, PriceFetcher};

/// Run a single ingestion pass against the configured store and print the report
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;

    println!("📥 Ingesting {} days per ticker from {}", config.ingestion.days, config.ticker_list.display());

    let fetcher = Arc::new(HistoricalPriceClient::new(&config.price_api)?) as Arc<dyn PriceFetcher>;
    let repositories = initialize_repositories(&config);
    let job = build_ingestion_job(&config, fetcher, repositories.price_repository);

    let report = job.run().await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.failures.is_empty() {
        println!("⚠️  {} of {} tickers failed", report.failures.len(), report.tickers_total);
    }

    Ok(())
}
