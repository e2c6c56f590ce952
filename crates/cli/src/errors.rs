//! CLI Errors

use coupons::{eligibility::EligibilityError, fixtures::FixtureError};
use thiserror::Error;

/// Errors raised while running a command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Fixture data could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// A coupon could not be evaluated for the booking.
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),

    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
