use std::time::Duration;

use reqwest::{Client, Response, Url};
use tracing::debug;

use super::api::{JobApi, WorldApi};
use super::error::RemoteError;
use super::types::{JobPayload, StartWorldRequest};
use crate::cancel::CancelSignal;
use crate::directive::StartDirective;
use crate::error::{ControlError, Outcome, Stage};
use crate::tracking::{Job, JobId};

/// REST client for a headless host's world and job endpoints.
pub struct HeadlessClient {
    client: Client,
    base_url: Url,
}

impl HeadlessClient {
    /// Client for the host listening on `server:port` over plain HTTP.
    pub fn new(server: &str, port: u16) -> Outcome<Self> {
        Self::with_base_url(&format!("http://{server}:{port}"))
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    ///
    /// An address that does not parse as an HTTP base URL is a
    /// configuration error, reported before any request is made.
    pub fn with_base_url(base_url: &str) -> Outcome<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ControlError::Configuration(format!("invalid host address {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ControlError::Configuration(format!(
                "invalid host address {base_url}: not a base URL"
            )));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RemoteError::from(e).during(Stage::Configuration))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // with_base_url rejects cannot-be-a-base URLs, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn submit(&self, directive: &StartDirective) -> Result<Job, RemoteError> {
        let url = self.endpoint(&["worlds"]);
        debug!(%url, ?directive, "submitting world start");
        let response = self
            .client
            .post(url)
            .json(&StartWorldRequest::from(directive))
            .send()
            .await?;
        read_job(response).await
    }

    async fn fetch_job(&self, id: &JobId) -> Result<Job, RemoteError> {
        let url = self.endpoint(&["jobs", id.as_str()]);
        let response = self.client.get(url).send().await?;
        read_job(response).await
    }
}

async fn read_job(response: Response) -> Result<Job, RemoteError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body.trim().to_string()
        };
        return Err(RemoteError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await?;
    let payload: JobPayload = serde_json::from_slice(&body)
        .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
    Ok(payload.into())
}

impl WorldApi for HeadlessClient {
    async fn start_world(
        &self,
        directive: &StartDirective,
        cancel: &CancelSignal,
    ) -> Outcome<Job> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ControlError::Cancelled { job_id: None }),
            submitted = self.submit(directive) => {
                submitted.map_err(|e| e.during(Stage::Submission))
            }
        }
    }
}

impl JobApi for HeadlessClient {
    async fn job_status(&self, id: &JobId) -> Outcome<Job> {
        self.fetch_job(id).await.map_err(|e| e.during(Stage::Wait))
    }
}
