//! The synchronization pipeline.
//!
//! A sync pass runs, in order:
//! 1. [`resolve_eligible_feeds`] - groups to eligible feed ids
//! 2. [`fetch_unread_items`] - unread ids, fetched in batches of [`MAX_IDS_PER_REQUEST`]
//! 3. [`generate_tasks`] - one [`DownloadTask`] per eligible item
//! 4. per task: submit the job, then [`mark_read`] only if it was accepted
//!
//! [`SyncDriver`] runs a single pass or repeats passes on an interval.

mod driver;
mod groups;
mod marker;
mod tasks;
mod unread;

pub use driver::{SyncDriver, SyncReport};
pub use groups::resolve_eligible_feeds;
pub use marker::mark_read;
pub use tasks::{DownloadTask, build_job, generate_tasks};
pub use unread::{MAX_IDS_PER_REQUEST, fetch_unread_items, partition_ids};
