//! Coupon Definitions
//!
//! The raw, unvalidated shape of a coupon as handed over by the data service.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::coupons::{CouponId, CouponStatus, CustomerScope, errors::InvalidCouponDefinition};

/// How a coupon's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountType {
    /// `value` is a percentage of the booking amount, within `0..=100`.
    Percentage,

    /// `value` is an amount of money in major units.
    Flat,
}

impl DiscountType {
    /// Return the canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Flat => "flat",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = InvalidCouponDefinition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("percentage") {
            Ok(Self::Percentage)
        } else if trimmed.eq_ignore_ascii_case("flat") {
            Ok(Self::Flat)
        } else {
            Err(InvalidCouponDefinition::UnknownDiscountType(s.to_string()))
        }
    }
}

/// Coupon definition prior to validation.
///
/// All amounts are in major units of `currency`. Convert with
/// `Coupon::try_from` to obtain a coupon the engine will evaluate.
#[derive(Debug, Clone)]
pub struct CouponDefinition<'a> {
    /// Coupon identity
    pub id: CouponId,

    /// Human-facing code, e.g. `SUMMER20`
    pub code: String,

    /// Discount kind
    pub discount_type: DiscountType,

    /// Discount magnitude
    pub value: Decimal,

    /// Currency of all monetary fields
    pub currency: &'a Currency,

    /// First instant the coupon may be used (inclusive)
    pub starts_at: Timestamp,

    /// Last instant the coupon may be used (inclusive)
    pub ends_at: Timestamp,

    /// Global redemption limit; `None` means unlimited
    pub usage_limit: Option<u32>,

    /// Redemptions recorded so far
    pub used_count: u32,

    /// Smallest booking amount the coupon applies to
    pub minimum_booking_amount: Decimal,

    /// Upper bound on a percentage discount
    pub max_discount_amount: Option<Decimal>,

    /// Which customers may use the coupon
    pub customer_scope: CustomerScope,

    /// Whether the coupon is switched on
    pub status: CouponStatus,
}
