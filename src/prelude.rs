//! Coupons prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bookings::{BookingContext, BookingId, CustomerId},
    coupons::{
        Coupon, CouponDefinition, CouponDiscount, CouponId, CouponStatus, CustomerScope,
        DiscountType, InvalidCouponDefinition,
    },
    discounts::{DiscountError, DiscountResult, apply_discount, calculate_discount},
    eligibility::{
        CouponPreview, Eligibility, EligibilityError, IneligibleReason, Rule, evaluate,
        evaluate_booking, preview,
    },
    fixtures::{Fixture, FixtureError},
    ids::TypedId,
    selection::{RankedCoupon, best_coupon, rank_coupons},
    usage::{CouponUsageRecord, UsageError, UsageHistory, UsageRecorder, UsageRequest},
};
