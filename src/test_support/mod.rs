//! Shared helpers for unit tests.

pub(crate) mod fakes;
pub(crate) mod socket_guard;

pub(crate) use fakes::{Event, FakeReader, FakeSubmitter, groups_response, item, item_url};
