//! MeTube download-queue client.
//!
//! - [`MetubeClient`] - posts one job to `{base}/add`
//! - [`JobSubmitter`] - async trait the sync driver consumes
//! - [`DownloadJobRequest`] / [`JobOptions`] - job body and user defaults

mod client;
mod error;
mod types;

pub use client::{JobSubmitter, MetubeClient};
pub use error::SubmitError;
pub use types::{AddResponse, DownloadJobRequest, Format, JobOptions, Quality};
