mod domain;
mod clients;
mod messages;

mod app_system;
mod config;
mod error;
mod shell;
mod storage;
mod ui;
mod view;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod api_actor;
mod session_actor;
mod cart_actor;
mod admin_actor;
mod records_actor;

use tokio::io::BufReader;
use tracing::{error, info};

use crate::app_system::{setup_tracing, StorefrontSystem};
use crate::config::ClientConfig;
use crate::error::ShellError;
use crate::shell::Shell;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ShellError> {
    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    // Setup tracing once for the entire application
    setup_tracing(&config.log_level);

    info!(api_url = %config.api_url, session_file = %config.session_file.display(), "Starting storefront");

    // Start every service
    let system = StorefrontSystem::new(&config)?;

    let mut shell = Shell::new(
        system,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        config.notice_duration(),
    );
    let outcome = shell.run().await;
    if let Err(e) = &outcome {
        error!(error = %e, "Shell stopped");
    }

    // Shutdown system gracefully
    let (system, _) = shell.into_parts();
    system.shutdown().await?;

    info!("Storefront closed");
    outcome
}
