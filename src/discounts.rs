//! Discounts
//!
//! Discount arithmetic for validated coupons. All amounts are handled in
//! minor units; percentage discounts round half away from zero.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::coupons::{Coupon, CouponDiscount};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Booking amounts cannot be negative.
    #[error("booking amount must not be negative, got {0} minor units")]
    NegativeAmount(i64),

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Discount applied to a booking, and what the customer pays afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountResult<'a> {
    discount_amount: Money<'a, Currency>,
    final_total: Money<'a, Currency>,
}

impl<'a> DiscountResult<'a> {
    /// Amount taken off the booking; never more than the booking amount.
    pub fn discount_amount(&self) -> Money<'a, Currency> {
        self.discount_amount
    }

    /// Booking amount less the discount; never negative.
    pub fn final_total(&self) -> Money<'a, Currency> {
        self.final_total
    }
}

/// Calculate the discount a coupon grants on a booking amount.
///
/// Percentage coupons take `value`% of the booking, clamped to the coupon's
/// cap when one is set. Flat coupons take their value, but never more than the
/// booking amount. The result is always within `0..=booking_amount`.
///
/// # Errors
///
/// Returns an error if:
/// - the booking amount is in a different currency to the coupon
///   (`DiscountError::Money`).
/// - the booking amount is negative (`DiscountError::NegativeAmount`).
/// - a percentage calculation cannot be represented in minor units
///   (`DiscountError::PercentConversion`).
pub fn calculate_discount<'a>(
    coupon: &Coupon<'a>,
    booking_amount: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, DiscountError> {
    ensure_same_currency(coupon.currency(), booking_amount.currency())?;

    let booking_minor = booking_amount.to_minor_units();

    if booking_minor < 0 {
        return Err(DiscountError::NegativeAmount(booking_minor));
    }

    let discount_minor = match coupon.discount() {
        CouponDiscount::Percentage { percent, cap, .. } => {
            let raw = percent_of_minor(percent, booking_minor)?;

            cap.map_or(raw, |cap| raw.min(cap.to_minor_units()))
        }
        CouponDiscount::Flat(value) => value.to_minor_units().min(booking_minor),
    };

    Ok(Money::from_minor(
        discount_minor.clamp(0, booking_minor),
        booking_amount.currency(),
    ))
}

/// Calculate the discount and the resulting total for a booking amount.
///
/// # Errors
///
/// Returns the same errors as [`calculate_discount`].
pub fn apply_discount<'a>(
    coupon: &Coupon<'a>,
    booking_amount: Money<'a, Currency>,
) -> Result<DiscountResult<'a>, DiscountError> {
    let discount_amount = calculate_discount(coupon, booking_amount)?;
    let final_total = booking_amount.sub(discount_amount)?;

    Ok(DiscountResult {
        discount_amount,
        final_total,
    })
}

/// Return a currency mismatch error unless both currencies are the same.
pub(crate) fn ensure_same_currency(
    expected: &Currency,
    actual: &Currency,
) -> Result<(), MoneyError> {
    if expected == actual {
        Ok(())
    } else {
        Err(MoneyError::CurrencyMismatch {
            expected: expected.iso_alpha_code,
            actual: actual.iso_alpha_code,
        })
    }
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns an error if the percentage calculation overflows or cannot be safely
/// represented (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage does not expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Convert a major-unit amount into the currency's minor units, rounding half
/// away from zero. Returns `None` if the result does not fit in an `i64`.
pub fn major_to_minor(amount: Decimal, currency: &Currency) -> Option<i64> {
    10_i64
        .checked_pow(currency.exponent)
        .map(Decimal::from)
        .and_then(|scale| amount.checked_mul(scale))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
}
