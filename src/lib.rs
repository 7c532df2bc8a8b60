//! Fevertube Core Library
//!
//! This library bridges a Fever-compatible feed reader and a MeTube download
//! queue: it discovers unread items in the selected feed groups, submits one
//! download job per item, and marks each item read once its job is accepted.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`auth`] - Fever API key derivation from user credentials
//! - [`config`] - Immutable sync configuration built once at startup
//! - [`fever`] - Authenticated Fever API client and response types
//! - [`metube`] - MeTube job submission client and request types
//! - [`sync`] - Group resolution, batched fetching, task generation, and the sync driver

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod fever;
pub(crate) mod http_client;
pub mod metube;
pub mod sync;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use auth::{ApiKey, Credentials};
pub use config::{ConfigError, DuplicatePolicy, GroupFilter, HttpTimeouts, SyncConfig, SyncMode};
pub use fever::{
    AuthEnvelope, FeedGroup, FeedGroupMembership, FeedItem, FeedReader, FeverClient, FeverError,
    GroupsResponse, ItemsResponse, UnreadItemIdsResponse,
};
pub use metube::{
    AddResponse, DownloadJobRequest, Format, JobOptions, JobSubmitter, MetubeClient, Quality,
    SubmitError,
};
pub use sync::{
    DownloadTask, MAX_IDS_PER_REQUEST, SyncDriver, SyncReport, fetch_unread_items,
    generate_tasks, mark_read, partition_ids, resolve_eligible_feeds,
};
