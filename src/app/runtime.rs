//! Top-level command flow: config, tracing, then the selected command.

use anyhow::Result;
use clap::Parser;
use fevertube_core::{FeverClient, SyncDriver, SyncMode};
use tracing::{debug, info};

use crate::app::{config_manager, config_runtime, show_groups, terminal};
use crate::app_config::{self, FileConfig};
use crate::cli::{Args, Command};

pub(crate) async fn run_fevertube() -> Result<()> {
    // Parse before tracing so --help and --version print without logs.
    let args = Args::parse();

    let loaded = app_config::load_config(args.config.as_deref())?;
    let file_config = loaded.config.unwrap_or_default();

    let (default_level, force_cli_level) = config_runtime::resolve_log_level(&args, &file_config);
    let no_color = terminal::is_no_color_requested(args.no_color);
    terminal::init_tracing(default_level, force_cli_level, no_color);

    if let Some(path) = &loaded.path {
        debug!(path = %path.display(), "Config file location");
    }

    match args.command {
        Some(Command::ShowGroups) => run_show_groups(&args, &file_config).await,
        None => run_sync(&args, &file_config).await,
    }
}

async fn run_show_groups(args: &Args, file_config: &FileConfig) -> Result<()> {
    let connection = config_manager::resolve_connection(args, file_config)?;
    debug!(
        user = connection.credentials.username(),
        endpoint = %connection.fever_api_url,
        "Fetching feed groups"
    );
    let client = FeverClient::new(
        connection.fever_api_url,
        &connection.credentials,
        connection.timeouts,
    )?;
    let table = show_groups::fetch_groups_table(&client).await?;
    print!("{table}");
    Ok(())
}

async fn run_sync(args: &Args, file_config: &FileConfig) -> Result<()> {
    let config = config_manager::resolve_sync_config(args, file_config)?;
    let driver = SyncDriver::from_config(&config)?;

    let user = config.credentials.username();
    match driver.mode() {
        SyncMode::Once => info!(user, "Fevertube starting a single sync pass"),
        SyncMode::Poll(interval) => info!(
            user,
            interval_secs = interval.as_secs(),
            "Fevertube starting in polling mode"
        ),
    }
    debug!(?config, "Resolved configuration");

    driver.run().await;
    Ok(())
}
