//! Coupon Previews
//!
//! An eligibility decision alongside the discount the coupon would grant.

use jiff::Timestamp;

use crate::{
    bookings::{BookingContext, BookingId, CustomerId},
    coupons::{Coupon, CouponId},
    discounts::{DiscountResult, apply_discount},
    eligibility::{Eligibility, EligibilityError, evaluate_booking},
    usage::{UsageHistory, UsageRequest},
};

/// What-if view of a coupon against a booking.
///
/// The discount is always calculated, so callers can show the saving an
/// ineligible coupon would have given. Only [`CouponPreview::applied`] should
/// be used to price a booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponPreview<'a> {
    coupon_id: CouponId,
    customer_id: CustomerId,
    eligibility: Eligibility<'a>,
    discount: DiscountResult<'a>,
}

impl<'a> CouponPreview<'a> {
    /// Coupon this preview is for.
    pub fn coupon_id(&self) -> CouponId {
        self.coupon_id
    }

    /// Eligibility decision.
    pub fn eligibility(&self) -> &Eligibility<'a> {
        &self.eligibility
    }

    /// Whether the coupon may be applied.
    pub fn is_eligible(&self) -> bool {
        self.eligibility.is_eligible()
    }

    /// Discount the coupon would grant, eligible or not.
    pub fn estimated(&self) -> &DiscountResult<'a> {
        &self.discount
    }

    /// Discount to apply to the booking; `None` when ineligible.
    pub fn applied(&self) -> Option<&DiscountResult<'a>> {
        self.is_eligible().then_some(&self.discount)
    }

    /// Payload for the usage recorder once the booking is confirmed; `None`
    /// when ineligible.
    pub fn usage_request(&self, booking_id: BookingId) -> Option<UsageRequest<'a>> {
        self.applied().map(|discount| {
            UsageRequest::new(self.customer_id, self.coupon_id, booking_id, discount)
        })
    }
}

/// Evaluate a coupon and calculate the discount it would grant.
///
/// # Errors
///
/// Returns an error if the booking amount is in another currency or is
/// negative.
pub fn preview<'a>(
    coupon: &Coupon<'a>,
    usage_history: &UsageHistory<'_>,
    booking: &BookingContext<'a>,
    now: Timestamp,
) -> Result<CouponPreview<'a>, EligibilityError> {
    let eligibility = evaluate_booking(coupon, usage_history, booking, now)?;
    let discount = apply_discount(coupon, booking.booking_amount)?;

    Ok(CouponPreview {
        coupon_id: coupon.id(),
        customer_id: booking.customer_id,
        eligibility,
        discount,
    })
}
