//! CLI entry point for fevertube.

use std::process::ExitCode;

mod app;
mod app_config;
mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match app::runtime::run_fevertube().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
