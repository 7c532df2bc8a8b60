//! Batched retrieval of unread items.
//!
//! Fever accepts at most [`MAX_IDS_PER_REQUEST`] ids per `items` call; longer
//! `with_ids` lists are rejected or truncated server-side. The unread id list
//! is therefore split into bounded batches fetched one after another.

use std::slice::Chunks;

use tracing::{debug, info, warn};

use crate::fever::{FeedItem, FeedReader};

/// Upper bound on ids carried by one `items&with_ids=` request.
pub const MAX_IDS_PER_REQUEST: usize = 50;

/// Splits ids into consecutive batches of at most [`MAX_IDS_PER_REQUEST`].
#[must_use]
pub fn partition_ids(ids: &[u64]) -> Chunks<'_, u64> {
    ids.chunks(MAX_IDS_PER_REQUEST)
}

/// Fetches every unread item, batch by batch.
///
/// An unusable unread-id response yields nothing. A batch whose response is
/// unusable is skipped and the next batch is still fetched. Items come back
/// in batch order.
#[tracing::instrument(skip(reader))]
pub async fn fetch_unread_items<R>(reader: &R) -> Vec<FeedItem>
where
    R: FeedReader + ?Sized,
{
    let ids = match reader.unread_item_ids().await {
        Ok(response) => response.ids(),
        Err(error) => {
            warn!(error = %error, "Unread item ids unavailable; skipping this pass");
            return Vec::new();
        }
    };

    if ids.is_empty() {
        debug!("No unread items");
        return Vec::new();
    }

    let batches = partition_ids(&ids);
    let batch_count = batches.len();
    info!(unread = ids.len(), batches = batch_count, "Fetching unread items");

    let mut items = Vec::with_capacity(ids.len());
    for (index, batch) in batches.enumerate() {
        match reader.items_with_ids(batch).await {
            Ok(response) => {
                debug!(
                    batch = index + 1,
                    requested = batch.len(),
                    received = response.items.len(),
                    "Fetched item batch"
                );
                items.extend(response.items);
            }
            Err(error) => {
                warn!(
                    batch = index + 1,
                    of = batch_count,
                    error = %error,
                    "Skipping item batch"
                );
            }
        }
    }
    items
}
