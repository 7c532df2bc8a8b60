//! Fever API client.
//!
//! # Architecture
//!
//! - [`FeverClient`] - authenticated `POST` caller with envelope checking
//! - [`FeedReader`] - async trait the sync pipeline consumes
//! - [`FeverError`] - uniform "no usable data" outcome of a call
//! - response types ([`GroupsResponse`], [`UnreadItemIdsResponse`], [`ItemsResponse`])

mod client;
mod error;
mod types;

pub use client::{FeedReader, FeverClient};
pub use error::FeverError;
pub use types::{
    AuthEnvelope, FeedGroup, FeedGroupMembership, FeedItem, GroupsResponse, ItemsResponse,
    UnreadItemIdsResponse, parse_id_list,
};
