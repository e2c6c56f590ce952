//! Coupons
//!
//! Validated promotional rules. A [`Coupon`] can only be built from a
//! [`CouponDefinition`] that passes validation, so the evaluator and the
//! discount calculator never see a malformed rule.

use decimal_percentage::Percentage;
use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{discounts::major_to_minor, ids::TypedId};

mod definition;
mod errors;

pub use definition::{CouponDefinition, DiscountType};
pub use errors::InvalidCouponDefinition;

/// Coupon Id
pub type CouponId = TypedId<Coupon<'static>>;

/// Customers a coupon is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerScope {
    /// Anyone may use the coupon.
    All,

    /// Only customers without prior history.
    New,

    /// Only customers with prior history.
    Existing,
}

/// Coupon on/off switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponStatus {
    /// Coupon may be evaluated.
    Active,

    /// Coupon is switched off and is always rejected.
    Inactive,
}

/// Discount a coupon grants.
#[derive(Debug, Clone, Copy)]
pub enum CouponDiscount<'a> {
    /// A percentage of the booking amount (e.g. "20% off, up to £50").
    Percentage {
        /// Fraction of the booking amount to take off.
        percent: Percentage,

        /// Original percentage points, kept for display.
        points: Decimal,

        /// Upper bound on the discount.
        cap: Option<Money<'a, Currency>>,
    },

    /// A fixed amount off, never more than the booking amount (e.g. "£30 off").
    Flat(Money<'a, Currency>),
}

impl CouponDiscount<'_> {
    /// Return the discount kind.
    pub const fn discount_type(&self) -> DiscountType {
        match self {
            Self::Percentage { .. } => DiscountType::Percentage,
            Self::Flat(_) => DiscountType::Flat,
        }
    }
}

/// A validated coupon.
#[derive(Debug, Clone)]
pub struct Coupon<'a> {
    id: CouponId,
    code: String,
    discount: CouponDiscount<'a>,
    currency: &'a Currency,
    starts_at: Timestamp,
    ends_at: Timestamp,
    usage_limit: Option<u32>,
    used_count: u32,
    minimum_booking: Money<'a, Currency>,
    customer_scope: CustomerScope,
    status: CouponStatus,
}

impl<'a> Coupon<'a> {
    /// Return the coupon id.
    pub fn id(&self) -> CouponId {
        self.id
    }

    /// Return the human-facing code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Return the discount this coupon grants.
    pub fn discount(&self) -> &CouponDiscount<'a> {
        &self.discount
    }

    /// Return the currency of every monetary field.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// First instant of the validity window.
    pub fn starts_at(&self) -> Timestamp {
        self.starts_at
    }

    /// Last instant of the validity window.
    pub fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    /// Global redemption limit, if any.
    pub fn usage_limit(&self) -> Option<u32> {
        self.usage_limit
    }

    /// Redemptions recorded so far.
    pub fn used_count(&self) -> u32 {
        self.used_count
    }

    /// Redemptions left before the limit is reached; `None` when unlimited.
    pub fn remaining_uses(&self) -> Option<u32> {
        self.usage_limit
            .map(|limit| limit.saturating_sub(self.used_count))
    }

    /// Smallest booking amount the coupon applies to.
    pub fn minimum_booking(&self) -> Money<'a, Currency> {
        self.minimum_booking
    }

    /// Which customers may use the coupon.
    pub fn customer_scope(&self) -> CustomerScope {
        self.customer_scope
    }

    /// Coupon status.
    pub fn status(&self) -> CouponStatus {
        self.status
    }

    /// Whether the coupon is switched on.
    pub fn is_active(&self) -> bool {
        self.status == CouponStatus::Active
    }
}

impl<'a> TryFrom<CouponDefinition<'a>> for Coupon<'a> {
    type Error = InvalidCouponDefinition;

    fn try_from(definition: CouponDefinition<'a>) -> Result<Self, Self::Error> {
        let CouponDefinition {
            id,
            code,
            discount_type,
            value,
            currency,
            starts_at,
            ends_at,
            usage_limit,
            used_count,
            minimum_booking_amount,
            max_discount_amount,
            customer_scope,
            status,
        } = definition;

        if value < Decimal::ZERO {
            return Err(InvalidCouponDefinition::NegativeValue(value));
        }

        if minimum_booking_amount < Decimal::ZERO {
            return Err(InvalidCouponDefinition::NegativeMinimumBooking(
                minimum_booking_amount,
            ));
        }

        if starts_at > ends_at {
            return Err(InvalidCouponDefinition::InvalidWindow { starts_at, ends_at });
        }

        let discount = match discount_type {
            DiscountType::Percentage => {
                if value > Decimal::ONE_HUNDRED {
                    return Err(InvalidCouponDefinition::PercentageOutOfRange(value));
                }

                let cap = match max_discount_amount {
                    Some(cap) if cap < Decimal::ZERO => {
                        return Err(InvalidCouponDefinition::NegativeMaxDiscount(cap));
                    }
                    Some(cap) => Some(to_money(cap, currency)?),
                    None => None,
                };

                CouponDiscount::Percentage {
                    percent: Percentage::from(value / Decimal::ONE_HUNDRED),
                    points: value,
                    cap,
                }
            }
            // A cap on a flat coupon carries no meaning and is dropped.
            DiscountType::Flat => CouponDiscount::Flat(to_money(value, currency)?),
        };

        Ok(Self {
            id,
            code,
            discount,
            currency,
            starts_at,
            ends_at,
            usage_limit,
            used_count,
            minimum_booking: to_money(minimum_booking_amount, currency)?,
            customer_scope,
            status,
        })
    }
}

/// Convert a major-unit amount into money, rounding to the currency's minor units.
fn to_money(
    amount: Decimal,
    currency: &Currency,
) -> Result<Money<'_, Currency>, InvalidCouponDefinition> {
    let minor = major_to_minor(amount, currency)
        .ok_or(InvalidCouponDefinition::UnrepresentableAmount(amount))?;

    Ok(Money::from_minor(minor, currency))
}
