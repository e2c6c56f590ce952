//! Coupon definition errors.

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

/// A coupon definition that cannot be turned into a usable [`Coupon`](super::Coupon).
///
/// This is distinct from an ineligible coupon: a malformed rule is a bug in the
/// data feeding the engine and is never silently treated as "not applicable".
#[derive(Debug, Error, PartialEq)]
pub enum InvalidCouponDefinition {
    /// The discount type is not one of the supported kinds.
    #[error("unknown discount type: {0}")]
    UnknownDiscountType(String),

    /// The discount magnitude is negative.
    #[error("discount value must not be negative, got {0}")]
    NegativeValue(Decimal),

    /// A percentage discount above 100%.
    #[error("percentage discount must be within 0..=100, got {0}")]
    PercentageOutOfRange(Decimal),

    /// The minimum booking amount is negative.
    #[error("minimum booking amount must not be negative, got {0}")]
    NegativeMinimumBooking(Decimal),

    /// The maximum discount cap is negative.
    #[error("maximum discount amount must not be negative, got {0}")]
    NegativeMaxDiscount(Decimal),

    /// An amount that cannot be represented in the currency's minor units.
    #[error("amount cannot be represented in minor units: {0}")]
    UnrepresentableAmount(Decimal),

    /// The validity window ends before it starts.
    #[error("validity window ends ({ends_at}) before it starts ({starts_at})")]
    InvalidWindow {
        /// Start of the validity window.
        starts_at: Timestamp,

        /// End of the validity window.
        ends_at: Timestamp,
    },
}
