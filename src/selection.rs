//! Coupon Selection
//!
//! Ranks the coupons on offer for a booking so the best saving comes first.

use std::cmp::Reverse;

use jiff::Timestamp;

use crate::{
    bookings::BookingContext,
    coupons::Coupon,
    eligibility::{CouponPreview, EligibilityError, preview},
    usage::UsageHistory,
};

/// A coupon paired with its preview for one booking.
#[derive(Debug, Clone, Copy)]
pub struct RankedCoupon<'c, 'a> {
    /// Coupon being ranked
    pub coupon: &'c Coupon<'a>,

    /// Eligibility and discount for the booking
    pub preview: CouponPreview<'a>,
}

/// Preview every coupon for a booking, best first.
///
/// Eligible coupons come before ineligible ones. Within each group coupons are
/// ordered by discount, largest first, then by coupon id so the order is stable.
///
/// # Errors
///
/// Returns the first error raised while previewing a coupon, for example a
/// coupon in another currency to the booking.
pub fn rank_coupons<'c, 'a>(
    coupons: &'c [Coupon<'a>],
    usage_history: &UsageHistory<'_>,
    booking: &BookingContext<'a>,
    now: Timestamp,
) -> Result<Vec<RankedCoupon<'c, 'a>>, EligibilityError> {
    let mut ranked = coupons
        .iter()
        .map(|coupon| {
            preview(coupon, usage_history, booking, now)
                .map(|preview| RankedCoupon { coupon, preview })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ranked.sort_by_key(sort_key);

    Ok(ranked)
}

/// Return the eligible coupon granting the largest discount, if any.
///
/// # Errors
///
/// Returns the same errors as [`rank_coupons`].
pub fn best_coupon<'c, 'a>(
    coupons: &'c [Coupon<'a>],
    usage_history: &UsageHistory<'_>,
    booking: &BookingContext<'a>,
    now: Timestamp,
) -> Result<Option<RankedCoupon<'c, 'a>>, EligibilityError> {
    let ranked = rank_coupons(coupons, usage_history, booking, now)?;

    Ok(ranked
        .into_iter()
        .next()
        .filter(|ranked| ranked.preview.is_eligible()))
}

fn sort_key(ranked: &RankedCoupon<'_, '_>) -> (bool, Reverse<i64>, u64) {
    (
        !ranked.preview.is_eligible(),
        Reverse(
            ranked
                .preview
                .estimated()
                .discount_amount()
                .to_minor_units(),
        ),
        ranked.coupon.id().get(),
    )
}
