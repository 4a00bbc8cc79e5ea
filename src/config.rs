//! Client configuration module

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Storefront terminal client configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "storefront", about = "Terminal storefront for the store REST API", long_about = None)]
pub struct ClientConfig {
    /// Base URL of the store API
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:4000")]
    pub api_url: String,

    /// File holding the persisted session identity
    #[arg(long, env = "STOREFRONT_SESSION_FILE", default_value = ".storefront-session.json")]
    pub session_file: PathBuf,

    /// Pause before following a gate redirect, in milliseconds
    #[arg(long, env = "STOREFRONT_REDIRECT_DELAY_MS", default_value = "1500")]
    pub redirect_delay_ms: u64,

    /// How long a notice stays visible, in milliseconds
    #[arg(long, env = "STOREFRONT_NOTICE_MS", default_value = "4000")]
    pub notice_ms: u64,

    /// Mailbox capacity of each service, at least 1
    #[arg(
        long,
        env = "STOREFRONT_MAILBOX_SIZE",
        default_value = "32",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub mailbox_size: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl ClientConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    #[must_use]
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}
