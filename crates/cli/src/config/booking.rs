//! Booking Arguments

use clap::Args;
use jiff::Timestamp;

/// The booking a coupon is checked against.
#[derive(Debug, Args)]
pub(crate) struct BookingArgs {
    /// Coupon fixture set name
    #[arg(long, default_value = "demo")]
    pub coupons: String,

    /// Usage history fixture set name
    #[arg(long, default_value = "demo")]
    pub usage: String,

    /// Customer making the booking
    #[arg(long)]
    pub customer: u64,

    /// Booking amount, e.g. "120.00 GBP"
    #[arg(long)]
    pub amount: String,

    /// Evaluation instant in RFC 3339; defaults to the current time
    #[arg(long)]
    pub now: Option<Timestamp>,

    /// Whether the customer is new; derived from usage history when omitted
    #[arg(long)]
    pub new_customer: Option<bool>,
}
