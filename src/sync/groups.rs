//! Feed-group resolution.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::GroupFilter;
use crate::fever::FeedReader;

/// Resolves the feed ids whose items are eligible for download.
///
/// Feeds listed under several selected groups appear once. When the groups
/// call yields no usable data the result is empty, which makes the rest of
/// the pass a no-op rather than an error.
#[tracing::instrument(skip(reader))]
pub async fn resolve_eligible_feeds<R>(reader: &R, filter: &GroupFilter) -> BTreeSet<u64>
where
    R: FeedReader + ?Sized,
{
    let response = match reader.groups().await {
        Ok(response) => response,
        Err(error) => {
            warn!(error = %error, "No feed groups available; nothing is eligible this pass");
            return BTreeSet::new();
        }
    };

    let eligible: BTreeSet<u64> = response
        .memberships
        .iter()
        .filter(|membership| filter.includes(membership.group_id))
        .flat_map(|membership| membership.feed_ids.iter().copied())
        .collect();

    debug!(
        groups = response.memberships.len(),
        eligible_feeds = eligible.len(),
        "Resolved eligible feeds"
    );
    eligible
}
