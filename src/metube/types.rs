//! MeTube request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::ConfigError;

/// Video quality accepted by MeTube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    /// Best available.
    #[serde(rename = "best")]
    Best,
    /// 1440p.
    #[serde(rename = "1440")]
    P1440,
    /// 1080p.
    #[serde(rename = "1080")]
    P1080,
    /// 720p.
    #[serde(rename = "720")]
    P720,
    /// 480p.
    #[serde(rename = "480")]
    P480,
    /// Audio only.
    #[serde(rename = "audio")]
    Audio,
}

/// Container or output format accepted by MeTube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Mp4,
    M4a,
    Mp3,
    Opus,
    Wav,
    Thumbnail,
    Any,
}

/// User-supplied defaults overlaid on every generated job.
///
/// Keys MeTube understands but this type does not model are kept in
/// `extra` and forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOptions {
    /// Quality override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    /// Format override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Target folder, relative to MeTube's download root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    /// Prefix prepended to the downloaded file name.
    #[serde(
        rename = "custom_name_prefix",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name_prefix: Option<String>,
    /// Unmodelled keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobOptions {
    /// Parses the `--metube-option` JSON object.
    ///
    /// A `url` key is dropped: the job URL always comes from the feed item.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidJobOptions`] for non-object JSON or
    /// unknown `quality`/`format` values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut options: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::InvalidJobOptions {
                reason: e.to_string(),
            })?;
        if options.extra.remove("url").is_some() {
            warn!("Ignoring `url` in MeTube options; each job uses its feed item URL");
        }
        Ok(options)
    }
}

/// Body of `POST {metube}/add`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadJobRequest {
    /// Media URL.
    pub url: String,
    /// Requested quality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    /// Requested format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Target folder; MeTube rejects folders outside its root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    /// File name prefix.
    #[serde(
        rename = "custom_name_prefix",
        skip_serializing_if = "Option::is_none"
    )]
    pub name_prefix: Option<String>,
    /// Forwarded unmodelled option keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DownloadJobRequest {
    /// Creates a request carrying only a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            quality: None,
            format: None,
            folder: None,
            name_prefix: None,
            extra: Map::new(),
        }
    }
}

/// MeTube's reply to `/add`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddResponse {
    /// `"ok"` or `"error"`. Empty when MeTube omits it.
    #[serde(default)]
    pub status: String,
    /// Error detail.
    #[serde(default)]
    pub msg: Option<String>,
}

impl AddResponse {
    /// True when MeTube reported a logical failure despite HTTP success.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status.eq_ignore_ascii_case("error")
    }
}
