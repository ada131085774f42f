//! Command verbs: each one drives the capability traits for a single
//! invocation and writes its result line to the output sink.
//!
//! Every step returns an [`Outcome`]; the first failure is handed back to
//! the caller unchanged and no later step runs.

use std::io::Write;

use reqwest::Url;
use tracing::info;

use crate::cancel::CancelSignal;
use crate::directive::StartDirective;
use crate::error::{ControlError, Outcome};
use crate::headless::{JobApi, WorldApi};
use crate::tracking::{Job, JobId, JobStatus, JobTracker, PollPolicy, StatusObserver};

/// Collaborators a verb runs against.
pub struct Services<'a, W, J> {
    pub worlds: &'a W,
    pub jobs: &'a J,
    pub poll: PollPolicy,
    pub cancel: CancelSignal,
    pub observer: Option<&'a dyn StatusObserver>,
}

impl<'a, W, J: JobApi> Services<'a, W, J> {
    fn tracker(&self) -> JobTracker<'a, J> {
        let tracker = JobTracker::new(self.jobs, self.poll);
        match self.observer {
            Some(observer) => tracker.with_observer(observer),
            None => tracker,
        }
    }
}

/// Starts a world from a builtin template or a record URL and waits for it.
#[derive(Debug, Clone, Default)]
pub struct StartWorld {
    pub template: Option<String>,
    pub url: Option<Url>,
}

impl StartWorld {
    pub async fn execute<W: WorldApi, J: JobApi>(
        &self,
        services: &Services<'_, W, J>,
        out: &mut impl Write,
    ) -> Outcome<()> {
        let directive = StartDirective::resolve(self.template.as_deref(), self.url.as_ref())?;

        let job = services
            .worlds
            .start_world(&directive, &services.cancel)
            .await?;
        info!(job = %job.id, "host accepted world start");

        services.tracker().wait(job, &services.cancel).await?;

        writeln!(out, "World started")?;
        Ok(())
    }
}

/// Prints the current status of a job without waiting.
#[derive(Debug, Clone)]
pub struct ShowJob {
    pub id: JobId,
}

impl ShowJob {
    pub async fn execute<W, J: JobApi>(
        &self,
        services: &Services<'_, W, J>,
        out: &mut impl Write,
    ) -> Outcome<()> {
        let job = tokio::select! {
            biased;
            _ = services.cancel.cancelled() => {
                return Err(ControlError::Cancelled { job_id: Some(self.id.clone()) });
            }
            job = services.jobs.job_status(&self.id) => job?,
        };
        writeln!(out, "{}", describe(&job))?;
        Ok(())
    }
}

/// Waits for an already-submitted job to finish.
#[derive(Debug, Clone)]
pub struct WaitJob {
    pub id: JobId,
}

impl WaitJob {
    pub async fn execute<W, J: JobApi>(
        &self,
        services: &Services<'_, W, J>,
        out: &mut impl Write,
    ) -> Outcome<()> {
        let job = Job::new(self.id.clone(), JobStatus::Pending);
        let job = services.tracker().wait(job, &services.cancel).await?;
        writeln!(out, "Job {} succeeded", job.id)?;
        Ok(())
    }
}

fn describe(job: &Job) -> String {
    match &job.description {
        Some(description) => format!("{}: {} ({description})", job.id, job.status),
        None => format!("{}: {}", job.id, job.status),
    }
}
