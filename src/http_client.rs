//! Shared HTTP client construction policy.
//!
//! Both the Fever and MeTube clients are built here so they agree on
//! timeouts, user-agent, compression and proxy handling.

use std::panic::{AssertUnwindSafe, catch_unwind};

use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use crate::config::{ConfigError, HttpTimeouts};
use crate::user_agent;

/// Builds an HTTP client using the shared policy.
///
/// `service` is used only for logging.
///
/// # Errors
///
/// Returns [`ConfigError::HttpClient`] when client construction fails.
pub(crate) fn build_http_client(
    service: &str,
    timeouts: HttpTimeouts,
) -> Result<Client, ConfigError> {
    match try_build_client(timeouts, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Querying system proxy settings panics in some sandboxed
            // environments; env-proxy variables are still honored.
            warn!(
                service,
                "HTTP client hit system proxy panic; using env-proxy fallback builder"
            );
            match try_build_client(timeouts, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(ConfigError::http_client(format!(
                    "{service} client construction panicked"
                ))),
                Err(BuildClientFailure::Build(error)) => Err(ConfigError::http_client(error)),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(ConfigError::http_client(error)),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    timeouts: HttpTimeouts,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(timeouts);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(timeouts: HttpTimeouts) -> ClientBuilder {
    let builder = Client::builder()
        .connect_timeout(timeouts.connect)
        .user_agent(user_agent::default_user_agent())
        .gzip(true);
    match timeouts.read {
        Some(read) => builder.timeout(read),
        None => builder,
    }
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = env_proxy_for_scheme("https")
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = env_proxy_for_scheme("http")
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    match scheme {
        "https" => find_first_proxy_var(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"]),
        "http" => find_first_proxy_var(&["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]),
        _ => None,
    }
}

fn find_first_proxy_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
