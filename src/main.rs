use std::sync::Arc;
use stock_data_api::bootstrap::build_state;
use stock_data_api::{create_router, AppConfig, IngestionScheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_data_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let state = build_state(&config)?;

    // Scheduled ingestion (disabled unless INGESTION_ENABLED=true)
    let scheduler = if config.ingestion.enabled {
        let scheduler = IngestionScheduler::new(
            Arc::clone(&state.ingestion_job),
            config.ingestion.schedule.clone(),
        );
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("⏰ Scheduled ingestion disabled (INGESTION_ENABLED not set)");
        None
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("🚀 Stock Data API running on http://{}", config.bind_addr);
    tracing::info!("📈 Stock data: http://{}/api/stockData?ticker=AAPL&timeseries=3", config.bind_addr);
    tracing::info!("🏷️  Version: http://{}/api/version", config.bind_addr);
    tracing::info!("📚 Swagger UI: http://{}/swagger-ui", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
