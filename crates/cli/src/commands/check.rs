//! Check a single coupon

use std::path::Path;

use clap::Args;
use coupons::{bookings::BookingId, coupons::CouponId, eligibility::preview};
use tracing::debug;

use crate::{
    commands::Session, config::booking::BookingArgs, errors::CliError, render,
};

/// Arguments for `check`.
#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    /// Coupon id to check
    #[arg(long)]
    pub coupon: u64,

    /// Booking id, to show the usage record a confirmed booking would produce
    #[arg(long)]
    pub booking_id: Option<u64>,

    #[command(flatten)]
    pub booking: BookingArgs,
}

#[tracing::instrument(
    name = "coupons.cli.check",
    skip(args, fixtures),
    fields(coupon_id = args.coupon, customer_id = args.booking.customer),
    err
)]
pub(crate) fn run(args: &CheckArgs, fixtures: &Path) -> Result<String, CliError> {
    let session = Session::load(&args.booking, fixtures)?;
    let coupon = session.fixture.coupon(CouponId::new(args.coupon))?;

    let preview = preview(coupon, session.fixture.usage(), &session.booking, session.now)?;

    debug!(eligible = preview.is_eligible(), "coupon checked");

    let usage_request = args
        .booking_id
        .and_then(|id| preview.usage_request(BookingId::new(id)));

    Ok(render::check(
        coupon,
        &session.booking,
        &preview,
        usage_request.as_ref(),
    ))
}
