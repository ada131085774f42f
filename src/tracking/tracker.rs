use std::time::Duration;

use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, info};

use super::job::{Job, JobStatus};
use crate::cancel::CancelSignal;
use crate::error::{ControlError, Outcome};
use crate::headless::JobApi;

// Stand-in deadline for timeouts too large to add to the current instant.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Cadence and overall budget for waiting on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay after the first non-terminal observation.
    pub interval: Duration,
    /// Upper bound on the delay between polls.
    pub max_interval: Duration,
    /// Total time to wait before giving up.
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(1),
            timeout: Duration::from_secs(300),
        }
    }
}

impl PollPolicy {
    /// Delay to sleep after the given (1-based) poll.
    /// delay = min(interval * 2^(poll - 1), max_interval)
    ///
    /// With `max_interval <= interval` the cadence is fixed.
    pub fn delay_after_poll(&self, poll: u32) -> Duration {
        let factor = 2u32.saturating_pow(poll.saturating_sub(1));
        self.interval
            .saturating_mul(factor)
            .min(self.max_interval.max(self.interval))
    }
}

/// Receives every status observed while waiting on a job.
pub trait StatusObserver {
    fn observe(&self, job: &Job);
}

/// Waits for jobs to reach a terminal state by polling a [`JobApi`].
pub struct JobTracker<'a, J> {
    api: &'a J,
    policy: PollPolicy,
    observer: Option<&'a dyn StatusObserver>,
}

impl<'a, J: JobApi> JobTracker<'a, J> {
    pub fn new(api: &'a J, policy: PollPolicy) -> Self {
        Self {
            api,
            policy,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn StatusObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Poll `job` until it succeeds, fails, the deadline passes or `cancel` fires.
    ///
    /// A job that is already terminal is settled without querying the host.
    /// Cancellation and timeout only stop the local wait; the remote job is
    /// left untouched.
    pub async fn wait(&self, job: Job, cancel: &CancelSignal) -> Outcome<Job> {
        if job.status.is_terminal() {
            return settle(job);
        }

        let now = Instant::now();
        let deadline = now.checked_add(self.policy.timeout).unwrap_or(now + FAR_FUTURE);
        let mut polls: u32 = 0;

        loop {
            let observed = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(self.cancelled(&job)),
                _ = sleep_until(deadline) => return Err(self.timed_out(&job)),
                observed = self.api.job_status(&job.id) => observed?,
            };
            polls += 1;
            debug!(job = %observed.id, status = %observed.status, poll = polls, "observed job");
            if let Some(observer) = self.observer {
                observer.observe(&observed);
            }

            if observed.status.is_terminal() {
                return settle(observed);
            }

            let delay = self.policy.delay_after_poll(polls);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(self.cancelled(&job)),
                _ = sleep_until(deadline) => return Err(self.timed_out(&job)),
                _ = sleep(delay) => {}
            }
        }
    }

    fn cancelled(&self, job: &Job) -> ControlError {
        info!(job = %job.id, "stopped waiting for job: cancelled");
        ControlError::Cancelled {
            job_id: Some(job.id.clone()),
        }
    }

    fn timed_out(&self, job: &Job) -> ControlError {
        info!(job = %job.id, timeout = ?self.policy.timeout, "stopped waiting for job: timed out");
        ControlError::TimedOut {
            job_id: job.id.clone(),
            waited: self.policy.timeout,
        }
    }
}

fn settle(job: Job) -> Outcome<Job> {
    if let JobStatus::Failed(reason) = &job.status {
        info!(job = %job.id, %reason, "job failed");
        return Err(ControlError::JobFailed {
            job_id: job.id.clone(),
            reason: reason.clone(),
        });
    }
    info!(job = %job.id, "job succeeded");
    Ok(job)
}
