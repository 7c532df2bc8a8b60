//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Download unread Fever feed items with MeTube.
///
/// Fevertube reads unread items from a Fever-compatible RSS reader, queues
/// each one as a MeTube download, and marks the item read once MeTube has
/// accepted it.
#[derive(Parser, Debug)]
#[command(name = "fevertube")]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Fever API username
    #[arg(short = 'u', long, global = true)]
    pub user: Option<String>,

    /// Fever API password
    #[arg(short = 'p', long, global = true)]
    pub password: Option<String>,

    /// Base URL of the Fever API, including the `?api` selector
    #[arg(short = 'f', long, global = true)]
    pub fever_api_url: Option<String>,

    /// URL of MeTube
    #[arg(short = 'm', long)]
    pub metube_url: Option<String>,

    /// Comma-separated group ids to download from (default: all groups)
    #[arg(short = 'g', long)]
    pub feed_groups: Option<String>,

    /// MeTube download options as a JSON object
    #[arg(short = 'o', long)]
    pub metube_option: Option<String>,

    /// Poll for new items every N seconds instead of running once (0 runs once)
    #[arg(short = 'r', long, value_name = "SECONDS")]
    pub refreshing_interval: Option<u64>,

    /// Submit an item again when it appears more than once in the unread list
    #[arg(long)]
    pub keep_duplicates: bool,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, global = true, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// HTTP whole-request timeout in seconds (1-3600, default: none)
    #[arg(long, global = true, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,

    /// Read defaults from this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show all RSS subscription groups
    ShowGroups,
}
