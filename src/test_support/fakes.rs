//! In-memory fakes for the sync pipeline.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::fever::{
    AuthEnvelope, FeedGroup, FeedGroupMembership, FeedItem, FeedReader, FeverError,
    GroupsResponse, ItemsResponse, UnreadItemIdsResponse, parse_id_list,
};
use crate::metube::{AddResponse, DownloadJobRequest, JobSubmitter, SubmitError};

/// One outbound call observed by a fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Groups,
    UnreadIds,
    Items(Vec<u64>),
    MarkRead(u64),
    Submit(String),
}

/// Call log shared between a reader and a submitter.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
    pass_starts: Arc<Mutex<Vec<Instant>>>,
}

impl EventLog {
    fn record(&self, event: Event) {
        if event == Event::Groups {
            self.pass_starts.lock().unwrap().push(Instant::now());
        }
        self.events.lock().unwrap().push(event);
    }

    pub(crate) fn snapshot(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn marked(&self) -> Vec<u64> {
        self.snapshot()
            .into_iter()
            .filter_map(|event| match event {
                Event::MarkRead(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn submitted(&self) -> Vec<String> {
        self.snapshot()
            .into_iter()
            .filter_map(|event| match event {
                Event::Submit(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Times at which a `groups` call (the first call of a pass) was made.
    pub(crate) fn pass_starts(&self) -> Vec<Instant> {
        self.pass_starts.lock().unwrap().clone()
    }
}

/// Scripted [`FeedReader`].
///
/// Unconfigured `groups` and `unread_item_ids` calls fail as unauthenticated.
#[derive(Debug, Default)]
pub(crate) struct FakeReader {
    log: EventLog,
    groups: Option<GroupsResponse>,
    unread_ids: Option<String>,
    items: HashMap<u64, FeedItem>,
    failing_batch: Option<usize>,
    batches_served: AtomicUsize,
    mark_failures: HashSet<u64>,
}

impl FakeReader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_groups(mut self, response: GroupsResponse) -> Self {
        self.groups = Some(response);
        self
    }

    pub(crate) fn with_unread_ids(mut self, ids: &str) -> Self {
        self.unread_ids = Some(ids.to_string());
        self
    }

    pub(crate) fn with_items(mut self, items: impl IntoIterator<Item = FeedItem>) -> Self {
        self.items
            .extend(items.into_iter().map(|item| (item.id, item)));
        self
    }

    /// Makes the zero-based `index`th `items` call fail.
    pub(crate) fn with_failing_batch(mut self, index: usize) -> Self {
        self.failing_batch = Some(index);
        self
    }

    pub(crate) fn with_mark_failure(mut self, item_id: u64) -> Self {
        self.mark_failures.insert(item_id);
        self
    }

    pub(crate) fn log(&self) -> EventLog {
        self.log.clone()
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.log.snapshot()
    }
}

#[async_trait]
impl FeedReader for FakeReader {
    async fn groups(&self) -> Result<GroupsResponse, FeverError> {
        self.log.record(Event::Groups);
        self.groups
            .clone()
            .ok_or_else(|| FeverError::unauthenticated("groups"))
    }

    async fn unread_item_ids(&self) -> Result<UnreadItemIdsResponse, FeverError> {
        self.log.record(Event::UnreadIds);
        self.unread_ids
            .clone()
            .map(|unread_item_ids| UnreadItemIdsResponse {
                envelope: authenticated(),
                unread_item_ids,
            })
            .ok_or_else(|| FeverError::unauthenticated("unread_item_ids"))
    }

    async fn items_with_ids(&self, ids: &[u64]) -> Result<ItemsResponse, FeverError> {
        self.log.record(Event::Items(ids.to_vec()));
        let index = self.batches_served.fetch_add(1, Ordering::SeqCst);
        if self.failing_batch == Some(index) {
            return Err(FeverError::http_status("items", 500));
        }
        Ok(ItemsResponse {
            envelope: authenticated(),
            total_items: self.items.len() as u64,
            items: ids
                .iter()
                .filter_map(|id| self.items.get(id).cloned())
                .collect(),
        })
    }

    async fn mark_item_read(&self, item_id: u64) -> Result<AuthEnvelope, FeverError> {
        self.log.record(Event::MarkRead(item_id));
        if self.mark_failures.contains(&item_id) {
            return Err(FeverError::http_status("mark=item&as=read", 503));
        }
        Ok(authenticated())
    }
}

/// [`JobSubmitter`] that accepts everything except configured URLs.
#[derive(Debug, Default)]
pub(crate) struct FakeSubmitter {
    log: EventLog,
    rejected: HashSet<String>,
}

impl FakeSubmitter {
    pub(crate) fn new(log: EventLog) -> Self {
        Self {
            log,
            rejected: HashSet::new(),
        }
    }

    pub(crate) fn rejecting(mut self, url: &str) -> Self {
        self.rejected.insert(url.to_string());
        self
    }
}

#[async_trait]
impl JobSubmitter for FakeSubmitter {
    async fn submit(&self, job: &DownloadJobRequest) -> Result<AddResponse, SubmitError> {
        self.log.record(Event::Submit(job.url.clone()));
        if self.rejected.contains(&job.url) {
            return Err(SubmitError::rejected(
                job.url.clone(),
                Some("disk full".to_string()),
            ));
        }
        Ok(AddResponse {
            status: "ok".to_string(),
            msg: None,
        })
    }
}

fn authenticated() -> AuthEnvelope {
    AuthEnvelope {
        api_version: 3,
        authenticated: true,
        last_refreshed_at: Some(1_700_000_000),
    }
}

/// Builds a groups response from `(group_id, "feed,ids")` pairs.
pub(crate) fn groups_response(groups: &[(u64, &str)]) -> GroupsResponse {
    GroupsResponse {
        envelope: authenticated(),
        groups: Some(
            groups
                .iter()
                .map(|&(id, _)| FeedGroup {
                    id,
                    title: format!("Group {id}"),
                })
                .collect(),
        ),
        memberships: groups
            .iter()
            .map(|&(group_id, feeds)| FeedGroupMembership {
                group_id,
                feed_ids: parse_id_list(feeds),
            })
            .collect(),
    }
}

pub(crate) fn item_url(id: u64) -> String {
    format!("https://video.example/{id}")
}

pub(crate) fn item(id: u64, feed_id: u64) -> FeedItem {
    FeedItem {
        id,
        feed_id,
        title: format!("Item {id}"),
        author: String::new(),
        html: String::new(),
        url: item_url(id),
        is_saved: false,
        is_read: false,
        created_at: None,
    }
}
