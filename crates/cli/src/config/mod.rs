//! CLI configuration

use std::path::PathBuf;

use clap::Parser;

use crate::{commands::Command, config::logging::LoggingConfig};

pub(crate) mod booking;
pub(crate) mod logging;

/// Coupon eligibility and discount checks against fixture data
#[derive(Debug, Parser)]
#[command(
    name = "coupons-cli",
    about = "Check coupon eligibility and discounts for a booking",
    long_about = None
)]
pub(crate) struct Cli {
    /// Directory holding `coupons/` and `usage/` fixture sets
    #[arg(long, env = "COUPONS_FIXTURES", default_value = "./fixtures", global = true)]
    pub fixtures: PathBuf,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
