//! Sync configuration.
//!
//! [`SyncConfig`] is assembled once at startup (by the CLI layer, from flags
//! and the optional config file) and is read-only afterwards. Components take
//! the pieces they need from it by reference.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::auth::Credentials;
use crate::metube::JobOptions;

/// Default transport connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while assembling or validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was not supplied.
    #[error("missing required setting `{field}`\n  Suggestion: {suggestion}")]
    Missing {
        /// Setting name as written on the command line.
        field: &'static str,
        /// How to supply it.
        suggestion: &'static str,
    },

    /// A base URL could not be parsed.
    #[error("invalid URL for `{field}`: '{value}' ({reason})")]
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Value as supplied.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// A feed group id was not a non-negative integer.
    #[error("invalid feed group id '{value}': expected comma-separated integers")]
    InvalidGroupId {
        /// Offending token.
        value: String,
    },

    /// The default job options JSON was malformed.
    #[error("invalid MeTube option JSON: {reason}")]
    InvalidJobOptions {
        /// Parser message.
        reason: String,
    },

    /// A timeout of zero seconds was configured.
    #[error("invalid timeout for `{field}`: must be at least 1 second")]
    InvalidTimeout {
        /// Setting name.
        field: &'static str,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    HttpClient {
        /// Builder message.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a `Missing` error.
    #[must_use]
    pub fn missing(field: &'static str, suggestion: &'static str) -> Self {
        Self::Missing { field, suggestion }
    }

    /// Creates an `InvalidUrl` error.
    #[must_use]
    pub fn invalid_url(field: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an `HttpClient` error.
    #[must_use]
    pub fn http_client(reason: impl ToString) -> Self {
        Self::HttpClient {
            reason: reason.to_string(),
        }
    }
}

/// Which feed groups are eligible for download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupFilter {
    /// Every group the feed reader reports.
    #[default]
    All,
    /// Only the listed group ids.
    Only(BTreeSet<u64>),
}

impl GroupFilter {
    /// Returns true when feeds of `group_id` should be downloaded.
    #[must_use]
    pub fn includes(&self, group_id: u64) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(&group_id),
        }
    }
}

impl FromStr for GroupFilter {
    type Err = ConfigError;

    /// Parses `"1,2,3"`. Blank input selects all groups.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().is_empty() {
            return Ok(Self::All);
        }
        let mut ids = BTreeSet::new();
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let id = token
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidGroupId {
                    value: token.to_string(),
                })?;
            ids.insert(id);
        }
        Ok(Self::Only(ids))
    }
}

/// How the driver schedules sync passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// A single pass, then return.
    #[default]
    Once,
    /// Pass, sleep for the interval, repeat until the process is killed.
    Poll(Duration),
}

impl SyncMode {
    /// Maps a refreshing interval in seconds; `0` means run once.
    #[must_use]
    pub fn from_interval_secs(secs: u64) -> Self {
        if secs == 0 {
            Self::Once
        } else {
            Self::Poll(Duration::from_secs(secs))
        }
    }
}

/// What to do when the same feed item shows up twice in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Generate at most one task per source item.
    #[default]
    Skip,
    /// Generate one task per occurrence.
    Keep,
}

/// Transport timeouts applied to both HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// TCP/TLS connect timeout.
    pub connect: Duration,
    /// Whole-request timeout; `None` leaves reqwest's default (no deadline).
    pub read: Option<Duration>,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read: None,
        }
    }
}

impl HttpTimeouts {
    /// Builds timeouts from whole seconds.
    #[must_use]
    pub fn from_secs(connect_secs: u64, read_secs: Option<u64>) -> Self {
        Self {
            connect: Duration::from_secs(connect_secs),
            read: read_secs.map(Duration::from_secs),
        }
    }
}

/// Everything one sync run needs, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Fever credentials.
    pub credentials: Credentials,
    /// Fever endpoint including its `?api` selector, e.g. `https://rss.example/fever/?api`.
    pub fever_base_url: String,
    /// MeTube root, e.g. `http://metube:8081`.
    pub metube_base_url: String,
    /// Eligible groups.
    pub group_filter: GroupFilter,
    /// User defaults overlaid on each generated job.
    pub job_options: JobOptions,
    /// Run once or poll.
    pub mode: SyncMode,
    /// Repeat-item handling.
    pub duplicates: DuplicatePolicy,
    /// Transport timeouts.
    pub timeouts: HttpTimeouts,
}

impl SyncConfig {
    /// Creates a config with defaults for everything but the endpoints and credentials.
    #[must_use]
    pub fn new(
        credentials: Credentials,
        fever_base_url: impl Into<String>,
        metube_base_url: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            fever_base_url: fever_base_url.into(),
            metube_base_url: metube_base_url.into(),
            group_filter: GroupFilter::default(),
            job_options: JobOptions::default(),
            mode: SyncMode::default(),
            duplicates: DuplicatePolicy::default(),
            timeouts: HttpTimeouts::default(),
        }
    }

    /// Checks credentials, base URLs and timeouts.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.is_incomplete() {
            return Err(ConfigError::missing(
                "user/password",
                "Pass --user and --password or set them in the config file",
            ));
        }
        validate_base_url("fever-api-url", &self.fever_base_url)?;
        validate_base_url("metube-url", &self.metube_base_url)?;
        validate_timeouts(&self.timeouts)
    }
}

/// Validates an HTTP(S) base URL.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] for unparsable or non-HTTP URLs.
pub fn validate_base_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(value).map_err(|e| ConfigError::invalid_url(field, value, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::invalid_url(
            field,
            value,
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Rejects zero-second timeouts.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTimeout`] naming the offending field.
pub fn validate_timeouts(timeouts: &HttpTimeouts) -> Result<(), ConfigError> {
    if timeouts.connect.is_zero() {
        return Err(ConfigError::InvalidTimeout {
            field: "connect-timeout",
        });
    }
    if timeouts.read.is_some_and(|d| d.is_zero()) {
        return Err(ConfigError::InvalidTimeout { field: "timeout" });
    }
    Ok(())
}
