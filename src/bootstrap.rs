//! Explicit wiring of fetcher, repositories and ingestion job

use std::sync::Arc;

use crate::api::{AppState, StoreBackend};
use crate::config::{AppConfig, ConfigError, TickerListLoader};
use crate::database::repositories::*;
use crate::database::{establish_connection_pool, run_migrations, StoreError};
use crate::jobs::IngestionJob;
use crate::market_data::{HistoricalPriceClient, PriceFetcher};

/// Repositories plus the backend serving them
pub struct Repositories {
    pub price_repository: Arc<dyn PriceRepository>,
    pub version_repository: Arc<dyn VersionRepository>,
    pub backend: StoreBackend,
}

/// Connect to PostgreSQL and run migrations
///
/// Falls back to in-memory repositories when `DATABASE_URL` is unset or the
/// database cannot be reached, so the pass-through endpoint keeps working.
pub fn initialize_repositories(config: &AppConfig) -> Repositories {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("⚠️  DATABASE_URL not set, using in-memory store");
        return in_memory_repositories();
    };

    tracing::info!("🗄️  Initializing PostgreSQL connection...");

    match connect(database_url, config.db_pool_max_size) {
        Ok(repositories) => {
            tracing::info!("✅ Database integration complete");
            repositories
        }
        Err(e) => {
            tracing::error!("❌ Failed to initialize database: {}", e);
            tracing::warn!("⚠️  Server will start with an in-memory store");
            in_memory_repositories()
        }
    }
}

fn connect(database_url: &str, pool_size: u32) -> Result<Repositories, StoreError> {
    let pool = establish_connection_pool(database_url, pool_size)?;
    let applied = run_migrations(&pool)?;
    tracing::info!("Migrations up to date ({} applied)", applied);

    let pool_clone = pool.clone();
    let price_repository = Arc::new(PriceRepositoryImpl::new(move || {
        pool_clone
            .get()
            .map_err(|e| StoreError::ConnectionPoolError(e.to_string()))
    })) as Arc<dyn PriceRepository>;

    let version_repository = Arc::new(VersionRepositoryImpl::new(move || {
        pool.get()
            .map_err(|e| StoreError::ConnectionPoolError(e.to_string()))
    })) as Arc<dyn VersionRepository>;

    Ok(Repositories {
        price_repository,
        version_repository,
        backend: StoreBackend::Postgres,
    })
}

fn in_memory_repositories() -> Repositories {
    Repositories {
        price_repository: Arc::new(InMemoryPriceRepository::new()),
        version_repository: Arc::new(InMemoryVersionRepository::new()),
        backend: StoreBackend::Memory,
    }
}

/// Build the ingestion job from configuration and already-built collaborators
pub fn build_ingestion_job(
    config: &AppConfig,
    fetcher: Arc<dyn PriceFetcher>,
    price_repository: Arc<dyn PriceRepository>,
) -> IngestionJob {
    IngestionJob::new(
        TickerListLoader::new(config.ticker_list.clone()),
        fetcher,
        price_repository,
        config.ingestion.days,
    )
}

/// Build the full handler state
pub fn build_state(config: &AppConfig) -> Result<AppState, ConfigError> {
    let fetcher = Arc::new(HistoricalPriceClient::new(&config.price_api)?) as Arc<dyn PriceFetcher>;
    let repositories = initialize_repositories(config);

    let ingestion_job = Arc::new(build_ingestion_job(
        config,
        Arc::clone(&fetcher),
        Arc::clone(&repositories.price_repository),
    ));

    Ok(AppState {
        fetcher,
        price_repository: repositories.price_repository,
        version_repository: repositories.version_repository,
        ingestion_job,
        store_backend: repositories.backend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state_without_database() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let state = build_state(&config).unwrap();

        assert_eq!(state.store_backend, StoreBackend::Memory);
        assert_eq!(state.ingestion_job.days(), 3);
        assert!(state.version_repository.find_latest().unwrap().is_none());
    }
}
