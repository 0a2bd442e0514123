use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::{ConfigError, TickerListLoader};
use crate::database::models::NewStockPrice;
use crate::database::repositories::PriceRepository;
use crate::database::StoreError;
use crate::market_data::{FetchError, PriceFetcher, RecordSetError};

/// Errors that abort a whole ingestion run
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Another run holds the guard
    #[error("Ingestion run already in progress")]
    AlreadyRunning,

    /// The ticker list could not be loaded; nothing was written
    #[error("Ticker list unavailable: {0}")]
    Config(#[from] ConfigError),
}

/// Reasons a single ticker is skipped; the run carries on
#[derive(Debug, Error)]
pub enum TickerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unusable response: {0}")]
    Records(#[from] RecordSetError),

    #[error("expected {expected} records, provider returned {actual}")]
    InsufficientRecords { expected: usize, actual: usize },

    #[error("store write failed: {0}")]
    Store(#[from] StoreError),

    #[error("store task failed: {0}")]
    Task(String),
}

/// A ticker that produced no rows in a run
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TickerFailure {
    pub ticker: String,
    pub reason: String,
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngestionReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Trading days requested per ticker
    pub days: u32,
    pub tickers_total: usize,
    pub tickers_succeeded: usize,
    /// Rows newly inserted; pairs already stored are not counted
    pub rows_written: usize,
    pub failures: Vec<TickerFailure>,
}

/// Clears the running flag when the run ends, however it ends
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Ticker ingestion job
///
/// Loads the ticker list, fetches the last `days` trading days for each
/// ticker and persists one (ticker, date) row per day. One failing ticker
/// never aborts the batch.
pub struct IngestionJob {
    loader: TickerListLoader,
    fetcher: Arc<dyn PriceFetcher>,
    price_repository: Arc<dyn PriceRepository>,
    days: u32,
    running: AtomicBool,
    last_report: RwLock<Option<IngestionReport>>,
}

impl IngestionJob {
    /// Create a new ingestion job
    pub fn new(
        loader: TickerListLoader,
        fetcher: Arc<dyn PriceFetcher>,
        price_repository: Arc<dyn PriceRepository>,
        days: u32,
    ) -> Self {
        Self {
            loader,
            fetcher,
            price_repository,
            days: days.max(1),
            running: AtomicBool::new(false),
            last_report: RwLock::new(None),
        }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// True while a run holds the guard
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Report of the most recent completed run
    pub fn last_report(&self) -> Option<IngestionReport> {
        self.last_report.read().clone()
    }

    /// Run one ingestion pass
    ///
    /// Returns `AlreadyRunning` without doing anything if a pass is in
    /// flight, and `Config` if the ticker list cannot be loaded.
    pub async fn run(&self) -> Result<IngestionReport, IngestionError> {
        let _guard = RunGuard::acquire(&self.running).ok_or(IngestionError::AlreadyRunning)?;
        let started_at = Utc::now();

        let tickers = self.loader.load().map_err(|e| {
            tracing::error!("❌ Ingestion aborted, ticker list unavailable: {}", e);
            e
        })?;

        tracing::info!(
            "Starting ingestion run: {} tickers, {} days each",
            tickers.len(),
            self.days
        );

        let mut report = IngestionReport {
            started_at,
            finished_at: started_at,
            days: self.days,
            tickers_total: tickers.len(),
            tickers_succeeded: 0,
            rows_written: 0,
            failures: Vec::new(),
        };

        for ticker in tickers {
            match self.ingest_ticker(&ticker).await {
                Ok(written) => {
                    tracing::debug!("   {}: {} new rows", ticker, written);
                    report.tickers_succeeded += 1;
                    report.rows_written += written;
                }
                Err(e) => {
                    tracing::warn!("⚠️  Skipping {}: {}", ticker, e);
                    report.failures.push(TickerFailure {
                        ticker,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.finished_at = Utc::now();

        tracing::info!(
            "📥 Ingestion run completed: {}/{} tickers, {} new rows in {}ms",
            report.tickers_succeeded,
            report.tickers_total,
            report.rows_written,
            (report.finished_at - report.started_at).num_milliseconds()
        );

        *self.last_report.write() = Some(report.clone());

        Ok(report)
    }

    async fn ingest_ticker(&self, ticker: &str) -> Result<usize, TickerError> {
        let days = self.days as usize;
        let record_set = self.fetcher.fetch_historical(ticker, self.days).await?;

        let available = record_set
            .historical()
            .ok_or(RecordSetError::MissingHistorical)?
            .len();
        if available < days {
            return Err(TickerError::InsufficientRecords {
                expected: days,
                actual: available,
            });
        }

        let prices: Vec<NewStockPrice> = record_set
            .records(days)?
            .into_iter()
            .map(|record| NewStockPrice::new(ticker, record.date))
            .collect();

        // Diesel is blocking
        let repository = Arc::clone(&self.price_repository);
        let written = tokio::task::spawn_blocking(move || repository.save_batch(prices))
            .await
            .map_err(|e| TickerError::Task(e.to_string()))??;

        Ok(written)
    }
}
