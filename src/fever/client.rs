//! Authenticated Fever API client.
//!
//! Every Fever operation is a `POST` to the same endpoint with the operation
//! selector appended to the query string and the api key in a form body.
//! [`FeverClient::call`] performs that request, checks the `auth` flag of the
//! envelope before touching any payload field, and logs every failure before
//! handing it back as a [`FeverError`].

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::{ApiKey, Credentials};
use crate::config::{ConfigError, HttpTimeouts};
use crate::http_client::build_http_client;

use super::error::FeverError;
use super::types::{AuthEnvelope, GroupsResponse, ItemsResponse, UnreadItemIdsResponse};

/// The feed-reader operations the sync pipeline depends on.
///
/// [`FeverClient`] is the production implementation; the pipeline is generic
/// over this trait so its sequencing can be exercised without a server.
#[async_trait]
pub trait FeedReader: Send + Sync {
    /// Fetches groups and group-to-feed memberships.
    async fn groups(&self) -> Result<GroupsResponse, FeverError>;

    /// Fetches the comma-delimited list of unread item ids.
    async fn unread_item_ids(&self) -> Result<UnreadItemIdsResponse, FeverError>;

    /// Fetches full records for `ids` (at most 50 per call).
    async fn items_with_ids(&self, ids: &[u64]) -> Result<ItemsResponse, FeverError>;

    /// Marks a single item as read.
    async fn mark_item_read(&self, id: u64) -> Result<AuthEnvelope, FeverError>;
}

/// HTTP client for a Fever-compatible API.
///
/// Create once per process and reuse; the inner `reqwest` client pools
/// connections.
pub struct FeverClient {
    client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl FeverClient {
    /// Creates a client for `base_url` (which carries the `?api` selector).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if HTTP client construction fails.
    pub fn new(
        base_url: impl Into<String>,
        credentials: &Credentials,
        timeouts: HttpTimeouts,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_http_client("fever", timeouts)?,
            base_url: base_url.into(),
            api_key: credentials.api_key(),
        })
    }

    /// Calls one Fever operation and decodes the authenticated response.
    ///
    /// The request URL is `{base_url}&{endpoint}` followed by
    /// `&{extra_query}` when given. Failures are logged here; callers only
    /// decide what an absent response means for them.
    ///
    /// # Errors
    ///
    /// Returns [`FeverError`] on transport failure, non-success status,
    /// undecodable body, or `auth = 0`.
    #[tracing::instrument(skip(self), fields(service = "fever"))]
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        extra_query: Option<&str>,
    ) -> Result<T, FeverError> {
        let result = self.try_call(endpoint, extra_query).await;
        if let Err(error) = &result {
            warn!(operation = endpoint, error = %error, "Fever API call failed");
        }
        result
    }

    async fn try_call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        extra_query: Option<&str>,
    ) -> Result<T, FeverError> {
        let url = self.operation_url(endpoint, extra_query);
        debug!(operation = endpoint, "Calling Fever API");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(format!(
                "api_key={}",
                urlencoding::encode(self.api_key.as_str())
            ))
            .send()
            .await
            .map_err(|e| FeverError::network(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeverError::http_status(endpoint, status.as_u16()));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| FeverError::decode(endpoint, e))?;

        let envelope =
            AuthEnvelope::deserialize(&body).map_err(|e| FeverError::decode(endpoint, e))?;
        if !envelope.authenticated {
            return Err(FeverError::unauthenticated(endpoint));
        }

        serde_json::from_value(body).map_err(|e| FeverError::decode(endpoint, e))
    }

    fn operation_url(&self, endpoint: &str, extra_query: Option<&str>) -> String {
        match extra_query {
            Some(extra) if !extra.is_empty() => format!("{}&{endpoint}&{extra}", self.base_url),
            _ => format!("{}&{endpoint}", self.base_url),
        }
    }
}

impl std::fmt::Debug for FeverClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeverClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl FeedReader for FeverClient {
    async fn groups(&self) -> Result<GroupsResponse, FeverError> {
        self.call("groups", None).await
    }

    async fn unread_item_ids(&self) -> Result<UnreadItemIdsResponse, FeverError> {
        self.call("unread_item_ids", None).await
    }

    async fn items_with_ids(&self, ids: &[u64]) -> Result<ItemsResponse, FeverError> {
        let with_ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.call("items", Some(&format!("with_ids={with_ids}")))
            .await
    }

    async fn mark_item_read(&self, id: u64) -> Result<AuthEnvelope, FeverError> {
        self.call("mark=item&as=read", Some(&format!("id={id}")))
            .await
    }
}
