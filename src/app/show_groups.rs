//! `show-groups`: print the reader's feed groups as a table.

use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use fevertube_core::{FeedGroup, FeedReader};

/// Fetches groups and renders them; a missing `groups` field is an error.
pub(crate) async fn fetch_groups_table<R>(reader: &R) -> Result<String>
where
    R: FeedReader + ?Sized,
{
    let response = reader
        .groups()
        .await
        .context("Failed to fetch feed groups")?;
    let Some(groups) = response.groups else {
        bail!("Fever API does not return any groups");
    };
    Ok(render_groups_table(&groups))
}

pub(crate) fn render_groups_table(groups: &[FeedGroup]) -> String {
    let id_width = groups
        .iter()
        .map(|group| group.id.to_string().len())
        .chain(std::iter::once("id".len()))
        .max()
        .unwrap_or(2);
    let title_width = groups
        .iter()
        .map(|group| group.title.chars().count())
        .chain(std::iter::once("title".len()))
        .max()
        .unwrap_or(5);

    let mut out = String::new();
    let _ = writeln!(out, "{:<id_width$}  {}", "id", "title");
    let _ = writeln!(out, "{}  {}", "-".repeat(id_width), "-".repeat(title_width));
    for group in groups {
        let _ = writeln!(out, "{:<id_width$}  {}", group.id, group.title);
    }
    out
}
