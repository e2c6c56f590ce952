//! Commands

use std::path::Path;

use clap::Subcommand;
use coupons::{
    bookings::{BookingContext, CustomerId},
    fixtures::{Fixture, parse_price},
};
use jiff::Timestamp;
use tracing::info;

use crate::{config::booking::BookingArgs, errors::CliError};

pub(crate) mod check;
pub(crate) mod list;

/// Available commands.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Check one coupon against a booking
    Check(check::CheckArgs),

    /// Rank every coupon in a set for a booking, best first
    List(list::ListArgs),
}

impl Command {
    /// Run the command, returning the text to print.
    pub(crate) fn run(&self, fixtures: &Path) -> Result<String, CliError> {
        match self {
            Self::Check(args) => check::run(args, fixtures),
            Self::List(args) => list::run(args, fixtures),
        }
    }
}

/// Fixture data and booking resolved from the shared booking arguments.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) fixture: Fixture,
    pub(crate) booking: BookingContext<'static>,
    pub(crate) now: Timestamp,
}

impl Session {
    pub(crate) fn load(args: &BookingArgs, fixtures: &Path) -> Result<Self, CliError> {
        let mut fixture = Fixture::with_base_path(fixtures);

        fixture
            .load_coupons(&args.coupons)?
            .load_usage(&args.usage)?;

        let customer_id = CustomerId::new(args.customer);
        let booking_amount = parse_price(&args.amount)?;

        let is_new_customer = args.new_customer.unwrap_or_else(|| {
            let derived = fixture.usage().is_new_customer(customer_id);

            info!(
                customer_id = %customer_id,
                is_new_customer = derived,
                "new-customer flag not given, derived from coupon usage history"
            );

            derived
        });

        Ok(Self {
            booking: BookingContext::new(booking_amount, customer_id, is_new_customer),
            now: args.now.unwrap_or_else(Timestamp::now),
            fixture,
        })
    }
}
