use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier the host assigned to an asynchronous job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a job as last reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed(String),
}

impl JobStatus {
    /// `Succeeded` and `Failed` never transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed(_))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Succeeded => write!(f, "succeeded"),
            JobStatus::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// Handle to a unit of work running on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub description: Option<String>,
    pub status: JobStatus,
}

impl Job {
    pub fn new(id: impl Into<JobId>, status: JobStatus) -> Self {
        Self {
            id: id.into(),
            description: None,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed("disk full".into()).is_terminal());
    }

    #[test]
    fn status_display() {
        assert_eq!(JobStatus::Running.to_string(), "running");
        assert_eq!(
            JobStatus::Failed("disk full".into()).to_string(),
            "failed (disk full)"
        );
    }

    #[test]
    fn job_id_serializes_as_plain_string() {
        let id = JobId::from("job-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""job-1""#);
        assert_eq!(id.as_str(), "job-1");
    }

    #[test]
    fn new_job_has_no_description() {
        let job = Job::new("job-2", JobStatus::Pending);
        assert_eq!(job.id.to_string(), "job-2");
        assert!(job.description.is_none());
    }
}
