//! Scheduler for periodic maintenance tasks.
//!
//! A cron-based job scheduler that runs housekeeping against the database at configured
//! intervals. Currently this purges cameras whose deletion undo window has passed.

use std::sync::Arc;

use chrono::Utc;
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, service::camera::CameraService};

pub mod config;

use self::config::camera as camera_config;

/// Job scheduler for background maintenance tasks.
pub struct Scheduler {
    db: DatabaseConnection,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { db, sched })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// The following jobs are registered:
    /// - Purge of cameras past their undo window
    ///
    /// # Returns
    /// - `Ok(())` - All jobs registered and scheduler started
    /// - `Err(Error)` - Failed to register a job or start the scheduler
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            camera_config::PURGE_CRON_EXPRESSION,
            "deleted camera purge",
            purge_deleted_cameras,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The function receives a clone of the database connection on every run. Non-zero
    /// counts are logged at info level, errors at error level.
    ///
    /// # Arguments
    /// - `cron` - Cron expression with seconds precision (e.g. "*/10 * * * * *")
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async function returning the number of records it processed
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<u64, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db).await {
                        Ok(0) => {}
                        Ok(count) => tracing::info!("Ran {} on {} record(s)", name, count),
                        Err(e) => tracing::error!("Error running {}: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}

async fn purge_deleted_cameras(db: DatabaseConnection) -> Result<u64, Error> {
    CameraService::new(&db)
        .purge_expired(Utc::now().naive_utc())
        .await
}
