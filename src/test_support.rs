//! Shared builders for unit tests.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, GBP},
};

use crate::{
    bookings::CustomerId,
    coupons::{Coupon, CouponDefinition, CouponId, CouponStatus, CustomerScope, DiscountType},
};

/// Start of the default validity window: 2026-06-01T00:00:00Z.
pub(crate) const WINDOW_START: i64 = 1_780_272_000;

/// End of the default validity window: 2026-08-31T23:59:59Z.
pub(crate) const WINDOW_END: i64 = 1_788_220_799;

/// An instant inside the default validity window.
pub(crate) fn mid_window() -> Timestamp {
    Timestamp::from_second(WINDOW_START + 86_400).unwrap_or(Timestamp::UNIX_EPOCH)
}

/// "20% off, up to £50", open to everyone, unlimited, no minimum.
pub(crate) fn definition() -> CouponDefinition<'static> {
    CouponDefinition {
        id: CouponId::new(1),
        code: "SUMMER20".to_string(),
        discount_type: DiscountType::Percentage,
        value: Decimal::from(20),
        currency: GBP,
        starts_at: Timestamp::from_second(WINDOW_START).unwrap_or(Timestamp::UNIX_EPOCH),
        ends_at: Timestamp::from_second(WINDOW_END).unwrap_or(Timestamp::UNIX_EPOCH),
        usage_limit: None,
        used_count: 0,
        minimum_booking_amount: Decimal::ZERO,
        max_discount_amount: Some(Decimal::from(50)),
        customer_scope: CustomerScope::All,
        status: CouponStatus::Active,
    }
}

/// Build a coupon from a definition known to be valid.
pub(crate) fn coupon(definition: CouponDefinition<'static>) -> Coupon<'static> {
    match Coupon::try_from(definition) {
        Ok(coupon) => coupon,
        Err(error) => unreachable!("test definition must be valid: {error}"),
    }
}

/// Pounds as money.
pub(crate) fn gbp(pounds: i64) -> Money<'static, Currency> {
    Money::from_minor(pounds * 100, GBP)
}

/// Default customer id used by unit tests.
pub(crate) const CUSTOMER: CustomerId = CustomerId::new(7);
