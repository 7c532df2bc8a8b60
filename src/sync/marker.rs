//! Marking feed items read after their download was accepted.

use tracing::{debug, warn};

use crate::fever::FeedReader;

/// Marks `item_id` read; returns whether Fever confirmed it.
///
/// A failure is logged and otherwise ignored: the item stays unread and its
/// job will be submitted again on a later pass.
pub async fn mark_read<R>(reader: &R, item_id: u64) -> bool
where
    R: FeedReader + ?Sized,
{
    match reader.mark_item_read(item_id).await {
        Ok(_) => {
            debug!(item_id, "Marked Fever item read");
            true
        }
        Err(error) => {
            warn!(item_id, error = %error, "Fever item was not marked read");
            false
        }
    }
}
