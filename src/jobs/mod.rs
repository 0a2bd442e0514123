/// Scheduled and on-demand background jobs
///
/// - Ticker ingestion: fetch recent daily prices and persist (ticker, date) rows
/// - Scheduler wrapper owning the periodic trigger

pub mod ingestion_job;
pub mod ingestion_scheduler;

pub use ingestion_job::{IngestionError, IngestionJob, IngestionReport, TickerFailure};
pub use ingestion_scheduler::{IngestionScheduler, SchedulerError};
