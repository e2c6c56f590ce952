//! Rank the coupons in a set

use std::path::Path;

use clap::Args;
use coupons::selection::rank_coupons;
use tracing::debug;

use crate::{commands::Session, config::booking::BookingArgs, errors::CliError, render};

/// Arguments for `list`.
#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub booking: BookingArgs,
}

#[tracing::instrument(
    name = "coupons.cli.list",
    skip(args, fixtures),
    fields(customer_id = args.booking.customer),
    err
)]
pub(crate) fn run(args: &ListArgs, fixtures: &Path) -> Result<String, CliError> {
    let session = Session::load(&args.booking, fixtures)?;

    let ranked = rank_coupons(
        session.fixture.coupons(),
        session.fixture.usage(),
        &session.booking,
        session.now,
    )?;

    debug!(
        coupons = ranked.len(),
        eligible = ranked.iter().filter(|r| r.preview.is_eligible()).count(),
        "coupons ranked"
    );

    Ok(render::ranking(&session.booking, &ranked))
}
