use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::headless::RemoteError;
use crate::tracking::JobId;

/// Result type returned by every fallible step of a verb.
pub type Outcome<T> = Result<T, ControlError>;

/// The step of a command invocation that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    Submission,
    Wait,
    Output,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Configuration => write!(f, "configuration"),
            Stage::Submission => write!(f, "submission"),
            Stage::Wait => write!(f, "wait"),
            Stage::Output => write!(f, "output"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("{0}")]
    Configuration(String),

    #[error("{source}")]
    Remote {
        stage: Stage,
        #[source]
        source: RemoteError,
    },

    #[error("job {job_id} failed: {reason}")]
    JobFailed { job_id: JobId, reason: String },

    #[error("job {job_id} did not finish within {}s", waited.as_secs())]
    TimedOut { job_id: JobId, waited: Duration },

    #[error("{}", cancelled_message(job_id.as_ref()))]
    Cancelled { job_id: Option<JobId> },

    #[error("could not write result: {0}")]
    Output(#[from] std::io::Error),
}

fn cancelled_message(job_id: Option<&JobId>) -> String {
    match job_id {
        Some(id) => format!("stopped waiting for job {id}; its outcome is unknown"),
        None => "cancelled before the host accepted the request".to_string(),
    }
}

impl ControlError {
    /// The invocation step this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            ControlError::Configuration(_) => Stage::Configuration,
            ControlError::Remote { stage, .. } => *stage,
            ControlError::JobFailed { .. } | ControlError::TimedOut { .. } => Stage::Wait,
            ControlError::Cancelled { job_id: None } => Stage::Submission,
            ControlError::Cancelled { job_id: Some(_) } => Stage::Wait,
            ControlError::Output(_) => Stage::Output,
        }
    }

    /// Process exit status reported for this error.
    ///
    /// Distinguishes user error (2), host error (3), a job that ran and
    /// failed (4), an exceeded wait budget (5) and caller abort (130).
    pub fn exit_code(&self) -> u8 {
        match self {
            ControlError::Output(_) => 1,
            ControlError::Configuration(_) => 2,
            ControlError::Remote { .. } => 3,
            ControlError::JobFailed { .. } => 4,
            ControlError::TimedOut { .. } => 5,
            ControlError::Cancelled { .. } => 130,
        }
    }
}
