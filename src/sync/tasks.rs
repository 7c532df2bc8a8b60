//! Download-task generation.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::config::DuplicatePolicy;
use crate::fever::FeedItem;
use crate::metube::{DownloadJobRequest, JobOptions, Quality};

/// One job to submit, tied to the feed item it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTask {
    /// Fever item id to mark read once the job is accepted.
    pub source_item_id: u64,
    /// The MeTube job body.
    pub job: DownloadJobRequest,
}

/// Builds one task per item whose feed is eligible.
///
/// Each job starts from `quality = best`, then takes every field set in
/// `options`. The URL always comes from the item.
#[must_use]
pub fn generate_tasks(
    items: &[FeedItem],
    eligible_feeds: &BTreeSet<u64>,
    options: &JobOptions,
    duplicates: DuplicatePolicy,
) -> Vec<DownloadTask> {
    let mut seen = HashSet::new();
    let tasks: Vec<DownloadTask> = items
        .iter()
        .filter(|item| eligible_feeds.contains(&item.feed_id))
        .filter(|item| match duplicates {
            DuplicatePolicy::Skip => seen.insert(item.id),
            DuplicatePolicy::Keep => true,
        })
        .map(|item| DownloadTask {
            source_item_id: item.id,
            job: build_job(&item.url, options),
        })
        .collect();

    debug!(
        items = items.len(),
        tasks = tasks.len(),
        "Generated download tasks"
    );
    tasks
}

/// Builds the job for `url` with `options` overlaid on the built-in defaults.
#[must_use]
pub fn build_job(url: &str, options: &JobOptions) -> DownloadJobRequest {
    DownloadJobRequest {
        url: url.to_string(),
        quality: Some(options.quality.unwrap_or(Quality::Best)),
        format: options.format,
        folder: options.folder.clone(),
        name_prefix: options.name_prefix.clone(),
        extra: options.extra.clone(),
    }
}
