//! Wire payloads exchanged with the host's REST control surface.
//!
//! `POST /worlds` takes a [`StartWorldRequest`]; both `POST /worlds` and
//! `GET /jobs/{id}` answer with a [`JobPayload`].

use serde::{Deserialize, Serialize};

use crate::directive::StartDirective;
use crate::tracking::{Job, JobId, JobStatus};

/// Reason recorded for a failed job whose payload carries no `error`.
const MISSING_FAILURE_REASON: &str = "no reason given";

/// Body of a world start request: `{"template": ...}` or `{"url": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StartWorldRequest {
    Template(String),
    Url(String),
}

impl From<&StartDirective> for StartWorldRequest {
    fn from(directive: &StartDirective) -> Self {
        match directive {
            StartDirective::ByTemplateName(name) => StartWorldRequest::Template(name.clone()),
            StartDirective::ByRecordLocator(url) => StartWorldRequest::Url(url.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// A job as the host reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPayload {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: WireStatus,
    /// Failure reason; only meaningful when `status` is `failed`.
    #[serde(default)]
    pub error: Option<String>,
}

impl From<JobPayload> for Job {
    fn from(payload: JobPayload) -> Self {
        let status = match payload.status {
            WireStatus::Pending => JobStatus::Pending,
            WireStatus::Running => JobStatus::Running,
            WireStatus::Succeeded => JobStatus::Succeeded,
            WireStatus::Failed => JobStatus::Failed(
                payload
                    .error
                    .unwrap_or_else(|| MISSING_FAILURE_REASON.to_string()),
            ),
        };
        Job {
            id: JobId::from(payload.id),
            description: payload.description,
            status,
        }
    }
}
