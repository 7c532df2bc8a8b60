//! The sync driver: one pass, or passes on a fixed interval.
//!
//! A pass resolves eligible feeds, fetches unread items, generates tasks and
//! then, strictly one task at a time, submits the job and marks the source
//! item read only if MeTube accepted it. Nothing runs concurrently; every
//! network call is awaited before the next one starts.

use std::convert::Infallible;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::{ConfigError, DuplicatePolicy, GroupFilter, SyncConfig, SyncMode};
use crate::fever::{FeedReader, FeverClient};
use crate::metube::{JobOptions, JobSubmitter, MetubeClient};

use super::groups::resolve_eligible_feeds;
use super::marker::mark_read;
use super::tasks::{DownloadTask, generate_tasks};
use super::unread::fetch_unread_items;

/// Counters for one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Feeds in the selected groups.
    pub eligible_feeds: usize,
    /// Unread items fetched across all batches.
    pub unread_items: usize,
    /// Tasks generated.
    pub tasks: usize,
    /// Jobs MeTube accepted.
    pub submitted: usize,
    /// Jobs that failed to submit; their items stay unread.
    pub failed: usize,
    /// Accepted jobs whose items were marked read.
    pub marked_read: usize,
    /// Accepted jobs whose items could not be marked read.
    pub mark_failed: usize,
}

/// Orchestrates sync passes against a feed reader and a job submitter.
pub struct SyncDriver<R, S> {
    reader: R,
    submitter: S,
    group_filter: GroupFilter,
    job_options: JobOptions,
    duplicates: DuplicatePolicy,
    mode: SyncMode,
}

impl SyncDriver<FeverClient, MetubeClient> {
    /// Builds a driver with HTTP clients for the configured services.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config is invalid or a client cannot be built.
    pub fn from_config(config: &SyncConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let reader = FeverClient::new(
            config.fever_base_url.clone(),
            &config.credentials,
            config.timeouts,
        )?;
        let submitter = MetubeClient::new(&config.metube_base_url, config.timeouts)?;
        Ok(Self::with_clients(config, reader, submitter))
    }
}

impl<R, S> SyncDriver<R, S>
where
    R: FeedReader,
    S: JobSubmitter,
{
    /// Builds a driver around caller-supplied clients.
    #[must_use]
    pub fn with_clients(config: &SyncConfig, reader: R, submitter: S) -> Self {
        Self {
            reader,
            submitter,
            group_filter: config.group_filter.clone(),
            job_options: config.job_options.clone(),
            duplicates: config.duplicates,
            mode: config.mode,
        }
    }

    /// The configured scheduling mode.
    #[must_use]
    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    /// Runs according to the configured mode.
    ///
    /// In [`SyncMode::Once`] this returns the report of the single pass; in
    /// [`SyncMode::Poll`] it never returns.
    pub async fn run(&self) -> SyncReport {
        match self.mode {
            SyncMode::Once => self.run_pass().await,
            SyncMode::Poll(interval) => match self.poll_forever(interval).await {},
        }
    }

    /// Runs a pass, sleeps `interval`, and repeats until the process is killed.
    ///
    /// The interval is measured from the end of one pass to the start of the
    /// next.
    pub async fn poll_forever(&self, interval: Duration) -> Infallible {
        info!(interval_secs = interval.as_secs(), "Polling for unread items");
        loop {
            self.run_pass().await;
            debug!(interval_secs = interval.as_secs(), "Sleeping until next sync pass");
            tokio::time::sleep(interval).await;
        }
    }

    /// Performs one full sync pass.
    #[tracing::instrument(skip(self))]
    pub async fn run_pass(&self) -> SyncReport {
        let mut report = SyncReport::default();

        let eligible = resolve_eligible_feeds(&self.reader, &self.group_filter).await;
        report.eligible_feeds = eligible.len();
        if eligible.is_empty() {
            info!("No eligible feeds; nothing to download");
            return report;
        }

        let items = fetch_unread_items(&self.reader).await;
        report.unread_items = items.len();

        let tasks = generate_tasks(&items, &eligible, &self.job_options, self.duplicates);
        report.tasks = tasks.len();

        for task in &tasks {
            self.process_task(task, &mut report).await;
        }

        info!(
            eligible_feeds = report.eligible_feeds,
            unread_items = report.unread_items,
            tasks = report.tasks,
            submitted = report.submitted,
            failed = report.failed,
            marked_read = report.marked_read,
            mark_failed = report.mark_failed,
            "Sync pass complete"
        );
        report
    }

    async fn process_task(&self, task: &DownloadTask, report: &mut SyncReport) {
        // Task progress is user-facing output, not a log line.
        println!("Submitting download task {}", task.job.url);

        if !self.submit(task).await {
            report.failed += 1;
            return;
        }
        report.submitted += 1;

        if mark_read(&self.reader, task.source_item_id).await {
            report.marked_read += 1;
        } else {
            report.mark_failed += 1;
        }
    }

    /// Submits one task's job; returns whether MeTube accepted it.
    pub async fn submit(&self, task: &DownloadTask) -> bool {
        match self.submitter.submit(&task.job).await {
            Ok(_) => true,
            Err(err) => {
                error!(
                    item_id = task.source_item_id,
                    url = %task.job.url,
                    error = %err,
                    "Download task failed to add"
                );
                false
            }
        }
    }
}
