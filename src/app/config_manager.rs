//! Merges command-line flags over config-file defaults.
//!
//! The result is validated once here; the library never sees a partially
//! filled configuration.

use anyhow::{Context, Result};
use fevertube_core::config::DEFAULT_CONNECT_TIMEOUT_SECS;
use fevertube_core::{
    ConfigError, Credentials, DuplicatePolicy, GroupFilter, HttpTimeouts, JobOptions, SyncConfig,
    SyncMode,
};

use crate::app_config::FileConfig;
use crate::cli::Args;

/// What every command needs to talk to Fever.
#[derive(Debug, Clone)]
pub(crate) struct ConnectionSettings {
    pub(crate) credentials: Credentials,
    pub(crate) fever_api_url: String,
    pub(crate) timeouts: HttpTimeouts,
}

fn pick(cli: Option<&String>, file: Option<&String>) -> Option<String> {
    cli.or(file).cloned()
}

pub(crate) fn resolve_connection(args: &Args, file: &FileConfig) -> Result<ConnectionSettings> {
    let user = pick(args.user.as_ref(), file.user.as_ref()).ok_or_else(|| {
        ConfigError::missing("user", "Pass --user or set `user` in the config file")
    })?;
    let password = pick(args.password.as_ref(), file.password.as_ref()).ok_or_else(|| {
        ConfigError::missing(
            "password",
            "Pass --password or set `password` in the config file",
        )
    })?;
    let fever_api_url = pick(args.fever_api_url.as_ref(), file.fever_api_url.as_ref())
        .ok_or_else(|| {
            ConfigError::missing(
                "fever-api-url",
                "Pass --fever-api-url or set `fever_api_url` in the config file",
            )
        })?;

    let credentials = Credentials::new(user, password);
    if credentials.is_incomplete() {
        return Err(ConfigError::missing(
            "user/password",
            "User and password must not be empty",
        )
        .into());
    }
    fevertube_core::config::validate_base_url("fever-api-url", &fever_api_url)?;

    let timeouts = HttpTimeouts::from_secs(
        args.connect_timeout
            .or(file.connect_timeout_secs)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        args.timeout.or(file.read_timeout_secs),
    );
    fevertube_core::config::validate_timeouts(&timeouts)?;

    Ok(ConnectionSettings {
        credentials,
        fever_api_url,
        timeouts,
    })
}

pub(crate) fn resolve_sync_config(args: &Args, file: &FileConfig) -> Result<SyncConfig> {
    let connection = resolve_connection(args, file)?;

    let metube_url = pick(args.metube_url.as_ref(), file.metube_url.as_ref())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            ConfigError::missing(
                "metube-url",
                "MeTube URL cannot be empty; pass --metube-url or set `metube_url` in the config file",
            )
        })?;

    let group_filter = pick(args.feed_groups.as_ref(), file.feed_groups.as_ref())
        .map(|raw| raw.parse::<GroupFilter>())
        .transpose()
        .context("Invalid --feed-groups value")?
        .unwrap_or_default();

    let job_options = pick(args.metube_option.as_ref(), file.metube_option.as_ref())
        .map(|raw| JobOptions::from_json(&raw))
        .transpose()
        .context("Invalid --metube-option value")?
        .unwrap_or_default();

    let mode = SyncMode::from_interval_secs(
        args.refreshing_interval
            .or(file.refreshing_interval)
            .unwrap_or(0),
    );

    let duplicates = if args.keep_duplicates || file.keep_duplicates.unwrap_or(false) {
        DuplicatePolicy::Keep
    } else {
        DuplicatePolicy::Skip
    };

    let mut config = SyncConfig::new(connection.credentials, connection.fever_api_url, metube_url);
    config.group_filter = group_filter;
    config.job_options = job_options;
    config.mode = mode;
    config.duplicates = duplicates;
    config.timeouts = connection.timeouts;
    config.validate()?;
    Ok(config)
}
