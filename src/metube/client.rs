//! MeTube job submission client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::{ConfigError, HttpTimeouts};
use crate::http_client::build_http_client;

use super::error::SubmitError;
use super::types::{AddResponse, DownloadJobRequest};

/// Accepts download jobs.
///
/// [`MetubeClient`] is the production implementation.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    /// Submits one job and returns MeTube's acknowledgment.
    async fn submit(&self, job: &DownloadJobRequest) -> Result<AddResponse, SubmitError>;
}

/// HTTP client for MeTube's `/add` endpoint.
#[derive(Debug, Clone)]
pub struct MetubeClient {
    client: Client,
    add_url: String,
}

impl MetubeClient {
    /// Creates a client for the MeTube instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if HTTP client construction fails.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_http_client("metube", timeouts)?,
            add_url: format!("{}/add", base_url.trim_end_matches('/')),
        })
    }

    /// The full job endpoint URL.
    #[must_use]
    pub fn add_url(&self) -> &str {
        &self.add_url
    }
}

#[async_trait]
impl JobSubmitter for MetubeClient {
    #[tracing::instrument(skip(self, job), fields(service = "metube", url = %job.url))]
    async fn submit(&self, job: &DownloadJobRequest) -> Result<AddResponse, SubmitError> {
        debug!(endpoint = %self.add_url, "Posting MeTube job");

        let response = self
            .client
            .post(&self.add_url)
            .json(job)
            .send()
            .await
            .map_err(|e| SubmitError::network(&job.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::http_status(&job.url, status.as_u16()));
        }

        let reply = response
            .json::<AddResponse>()
            .await
            .map_err(|e| SubmitError::decode(&job.url, e))?;

        if reply.is_error() {
            return Err(SubmitError::rejected(&job.url, reply.msg));
        }
        Ok(reply)
    }
}
