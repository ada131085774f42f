//! Capability traits the verbs depend on.
//!
//! [`HeadlessClient`](super::HeadlessClient) implements both against the
//! real host; tests substitute in-memory fakes.

use crate::cancel::CancelSignal;
use crate::directive::StartDirective;
use crate::error::Outcome;
use crate::tracking::{Job, JobId};

/// Starts worlds on the host.
#[allow(async_fn_in_trait)]
pub trait WorldApi {
    /// Ask the host to start the world described by `directive`.
    ///
    /// Issues exactly one request and returns the job the host created for
    /// it, without waiting for that job to finish.
    async fn start_world(&self, directive: &StartDirective, cancel: &CancelSignal)
    -> Outcome<Job>;
}

/// Reports the status of jobs running on the host.
#[allow(async_fn_in_trait)]
pub trait JobApi {
    /// Query the current status of one job. Safe to repeat on terminal jobs.
    async fn job_status(&self, id: &JobId) -> Outcome<Job>;
}
