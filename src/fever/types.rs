//! Fever API response types.
//!
//! Every response shares the [`AuthEnvelope`] fields; specialized responses
//! flatten it in. Fever encodes booleans as `0`/`1` and id lists as
//! comma-delimited strings, both of which are decoded here.

use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Base shape of every Fever response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AuthEnvelope {
    /// Server API version.
    #[serde(default)]
    pub api_version: i64,
    /// Whether the api key was accepted. Payload fields are absent when false.
    #[serde(rename = "auth", deserialize_with = "bool_from_flag")]
    pub authenticated: bool,
    /// Unix time of the server's last feed refresh.
    #[serde(
        rename = "last_refreshed_on_time",
        default,
        deserialize_with = "lenient_timestamp"
    )]
    pub last_refreshed_at: Option<i64>,
}

/// A feed group (folder/category).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedGroup {
    /// Group id.
    #[serde(deserialize_with = "lenient_id")]
    pub id: u64,
    /// Display title.
    #[serde(default)]
    pub title: String,
}

/// The feeds that belong to one group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedGroupMembership {
    /// Group id.
    #[serde(deserialize_with = "lenient_id")]
    pub group_id: u64,
    /// Member feed ids, in server order.
    #[serde(default, deserialize_with = "id_list")]
    pub feed_ids: Vec<u64>,
}

/// One article or video entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedItem {
    /// Item id.
    #[serde(deserialize_with = "lenient_id")]
    pub id: u64,
    /// Owning feed id.
    #[serde(deserialize_with = "lenient_id")]
    pub feed_id: u64,
    /// Item title.
    #[serde(default)]
    pub title: String,
    /// Item author.
    #[serde(default)]
    pub author: String,
    /// HTML body.
    #[serde(default)]
    pub html: String,
    /// Link to the article or video.
    #[serde(default)]
    pub url: String,
    /// Starred flag.
    #[serde(default, deserialize_with = "bool_from_flag")]
    pub is_saved: bool,
    /// Read flag.
    #[serde(default, deserialize_with = "bool_from_flag")]
    pub is_read: bool,
    /// Unix publication time.
    #[serde(
        rename = "created_on_time",
        default,
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<i64>,
}

/// Response of the `groups` operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupsResponse {
    /// Shared envelope.
    #[serde(flatten)]
    pub envelope: AuthEnvelope,
    /// Groups; `None` when the server omitted the field.
    #[serde(default)]
    pub groups: Option<Vec<FeedGroup>>,
    /// Group to feed relations.
    #[serde(rename = "feeds_groups", default)]
    pub memberships: Vec<FeedGroupMembership>,
}

/// Response of the `unread_item_ids` operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnreadItemIdsResponse {
    /// Shared envelope.
    #[serde(flatten)]
    pub envelope: AuthEnvelope,
    /// Comma-delimited unread ids.
    #[serde(default, deserialize_with = "string_or_null")]
    pub unread_item_ids: String,
}

impl UnreadItemIdsResponse {
    /// Parsed ids in server order.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        parse_id_list(&self.unread_item_ids)
    }
}

/// Response of the `items` operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemsResponse {
    /// Shared envelope.
    #[serde(flatten)]
    pub envelope: AuthEnvelope,
    /// Total item count reported by the server.
    #[serde(default)]
    pub total_items: u64,
    /// Requested items.
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

/// Parses a comma-delimited id list.
///
/// Blank entries are ignored; non-numeric entries are logged and skipped.
#[must_use]
pub fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<u64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(token, "Skipping non-numeric id in Fever id list");
                None
            }
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
    Text(String),
}

fn bool_from_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
        Flag::Text(value) => matches!(value.trim(), "1" | "true"),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Int(i64),
    Float(f64),
    Text(String),
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Timestamp>::deserialize(deserializer)?.and_then(|value| match value {
            Timestamp::Int(secs) => Some(secs),
            Timestamp::Float(secs) => Some(secs as i64),
            Timestamp::Text(text) => text.trim().parse().ok(),
        }),
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Id {
    Int(u64),
    Text(String),
}

// Some servers send 64-bit item ids as strings.
fn lenient_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Id::deserialize(deserializer)? {
        Id::Int(id) => Ok(id),
        Id::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn id_list<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(parse_id_list(&string_or_null(deserializer)?))
}
