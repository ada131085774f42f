mod job;
mod tracker;

pub use job::{Job, JobId, JobStatus};
pub use tracker::{JobTracker, PollPolicy, StatusObserver};

#[cfg(test)]
pub(crate) use tracker::tests::ScriptedJobs;
