use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use super::ingestion_job::{IngestionError, IngestionJob};
use crate::config::IngestionSchedule;

/// Scheduler lifecycle errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Ingestion scheduler already started")]
    AlreadyStarted,

    #[error("Ingestion scheduler not started")]
    NotStarted,

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] JobSchedulerError),
}

/// Periodic runner for the ingestion job
///
/// Owns the underlying `JobScheduler`. A tick that fires while the previous
/// run is still active is skipped by the job's run guard.
pub struct IngestionScheduler {
    job: Arc<IngestionJob>,
    schedule: IngestionSchedule,
    scheduler: Mutex<Option<JobScheduler>>,
}

impl IngestionScheduler {
    pub fn new(job: Arc<IngestionJob>, schedule: IngestionSchedule) -> Self {
        Self {
            job,
            schedule,
            scheduler: Mutex::new(None),
        }
    }

    pub async fn is_started(&self) -> bool {
        self.scheduler.lock().await.is_some()
    }

    /// Register the ingestion job and start ticking
    pub async fn start(&self) -> Result<(), SchedulerError> {
        let mut slot = self.scheduler.lock().await;
        if slot.is_some() {
            return Err(SchedulerError::AlreadyStarted);
        }

        let scheduler = JobScheduler::new().await?;
        scheduler.add(self.build_job()?).await?;
        scheduler.start().await?;

        tracing::info!("✅ Ingestion scheduler started ({})", self.schedule);

        *slot = Some(scheduler);
        Ok(())
    }

    /// Stop ticking; a run already in flight finishes on its own
    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        let mut scheduler = self
            .scheduler
            .lock()
            .await
            .take()
            .ok_or(SchedulerError::NotStarted)?;

        scheduler.shutdown().await?;

        tracing::info!("Ingestion scheduler stopped");
        Ok(())
    }

    fn build_job(&self) -> Result<Job, JobSchedulerError> {
        match &self.schedule {
            IngestionSchedule::Interval(every) => {
                let job = Arc::clone(&self.job);
                Job::new_repeated_async(*every, move |_uuid, _lock| {
                    let job = Arc::clone(&job);
                    Box::pin(async move {
                        run_scheduled(&job).await;
                    })
                })
            }
            IngestionSchedule::Cron(expr) => {
                let job = Arc::clone(&self.job);
                Job::new_async(expr.as_str(), move |_uuid, _lock| {
                    let job = Arc::clone(&job);
                    Box::pin(async move {
                        run_scheduled(&job).await;
                    })
                })
            }
        }
    }
}

async fn run_scheduled(job: &IngestionJob) {
    tracing::debug!("🕐 Ingestion job triggered");

    match job.run().await {
        Ok(report) if report.failures.is_empty() => {
            tracing::debug!("Scheduled ingestion completed successfully");
        }
        Ok(report) => {
            tracing::warn!(
                "Scheduled ingestion completed with {} failed tickers",
                report.failures.len()
            );
        }
        Err(IngestionError::AlreadyRunning) => {
            tracing::warn!("Previous ingestion run still active, skipping this tick");
        }
        Err(e) => {
            tracing::error!("Scheduled ingestion failed: {}", e);
        }
    }
}
