//! Eligibility
//!
//! Decides whether a coupon may be applied to a booking. Evaluation is a pure
//! function of its inputs: the same coupon, history, amount, instant and
//! customer flag always produce the same answer.

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    bookings::BookingContext,
    coupons::Coupon,
    discounts::{DiscountError, ensure_same_currency},
    eligibility::rules::Candidate,
    usage::{CouponUsageRecord, UsageHistory},
};

mod preview;
mod rules;

pub use preview::{CouponPreview, preview};
pub use rules::Rule;

/// Errors raised while evaluating a coupon.
///
/// These signal bad input from the caller. A coupon that simply does not apply
/// is reported as [`Eligibility::Ineligible`], never as an error.
#[derive(Debug, Error, PartialEq)]
pub enum EligibilityError {
    /// Booking amount and coupon use different currencies.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The discount preview could not be calculated.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Why a coupon cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IneligibleReason<'a> {
    /// The coupon is switched off.
    Inactive,

    /// The validity window has not opened yet.
    NotStarted {
        /// First instant the coupon may be used.
        starts_at: Timestamp,
    },

    /// The validity window has closed.
    Expired {
        /// Last instant the coupon could be used.
        ended_at: Timestamp,
    },

    /// Every allowed redemption has been used.
    UsageLimitReached {
        /// Global redemption limit.
        limit: u32,
    },

    /// The coupon is reserved for new customers.
    NewCustomersOnly,

    /// The coupon is reserved for existing customers.
    ExistingCustomersOnly,

    /// The booking amount is below the coupon's minimum.
    BelowMinimumBooking {
        /// Smallest booking amount the coupon applies to.
        minimum: Money<'a, Currency>,
    },
}

impl IneligibleReason<'_> {
    /// Return the rule that produced this reason.
    pub const fn rule(&self) -> Rule {
        match self {
            Self::Inactive => Rule::Status,
            Self::NotStarted { .. } | Self::Expired { .. } => Rule::ValidityWindow,
            Self::UsageLimitReached { .. } => Rule::UsageLimit,
            Self::NewCustomersOnly | Self::ExistingCustomersOnly => Rule::CustomerScope,
            Self::BelowMinimumBooking { .. } => Rule::MinimumBooking,
        }
    }
}

impl fmt::Display for IneligibleReason<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => f.write_str("coupon inactive"),
            Self::NotStarted { starts_at } => write!(f, "starts on {starts_at}"),
            Self::Expired { .. } => f.write_str("expired"),
            Self::UsageLimitReached { .. } => f.write_str("usage limit reached"),
            Self::NewCustomersOnly => f.write_str("for new customers only"),
            Self::ExistingCustomersOnly => f.write_str("for existing customers only"),
            Self::BelowMinimumBooking { minimum } => write!(f, "minimum booking: {minimum}"),
        }
    }
}

/// Outcome of evaluating a coupon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eligibility<'a> {
    /// The coupon may be applied.
    Eligible,

    /// The coupon may not be applied, for the first failing reason.
    Ineligible(IneligibleReason<'a>),
}

impl<'a> Eligibility<'a> {
    /// Whether the coupon may be applied.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// The reason the coupon may not be applied, if any.
    pub fn reason(&self) -> Option<&IneligibleReason<'a>> {
        match self {
            Self::Eligible => None,
            Self::Ineligible(reason) => Some(reason),
        }
    }
}

/// Evaluate a coupon for a booking amount.
///
/// Rules are checked in [`Rule::ORDER`], stopping at the first failure. The
/// customer's usage history is only used for diagnostics; whether a customer
/// counts as new is decided by the caller and passed in as `is_new_customer`.
///
/// The booking amount is validated before any rule runs, so a malformed
/// amount is an error even for an inactive coupon.
///
/// # Errors
///
/// Returns [`EligibilityError::Money`] if the booking amount is not in the
/// coupon's currency, or [`EligibilityError::Discount`] if it is negative.
pub fn evaluate<'a>(
    coupon: &Coupon<'a>,
    usage_history: &[CouponUsageRecord<'_>],
    booking_amount: Money<'a, Currency>,
    now: Timestamp,
    is_new_customer: bool,
) -> Result<Eligibility<'a>, EligibilityError> {
    ensure_same_currency(coupon.currency(), booking_amount.currency())?;

    let booking_minor = booking_amount.to_minor_units();

    if booking_minor < 0 {
        return Err(DiscountError::NegativeAmount(booking_minor).into());
    }

    let candidate = Candidate {
        booking_amount,
        now,
        is_new_customer,
    };

    let failure = Rule::ORDER
        .into_iter()
        .find_map(|rule| rule.check(coupon, &candidate));

    let Some(reason) = failure else {
        trace!(coupon_id = %coupon.id(), code = coupon.code(), "coupon eligible");

        return Ok(Eligibility::Eligible);
    };

    debug!(
        coupon_id = %coupon.id(),
        code = coupon.code(),
        rule = reason.rule().as_str(),
        %reason,
        prior_redemptions = usage_history.len(),
        redeemed_before = usage_history
            .iter()
            .any(|record| record.coupon_id == coupon.id()),
        "coupon ineligible"
    );

    Ok(Eligibility::Ineligible(reason))
}

/// Evaluate a coupon for a booking context.
///
/// # Errors
///
/// Returns the same errors as [`evaluate`].
pub fn evaluate_booking<'a>(
    coupon: &Coupon<'a>,
    usage_history: &UsageHistory<'_>,
    booking: &BookingContext<'a>,
    now: Timestamp,
) -> Result<Eligibility<'a>, EligibilityError> {
    evaluate(
        coupon,
        usage_history.for_customer(booking.customer_id),
        booking.booking_amount,
        now,
        booking.is_new_customer,
    )
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use rust_decimal::Decimal;
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::{
        bookings::{BookingId, CustomerId},
        coupons::{CouponDefinition, CouponId, CouponStatus, CustomerScope},
        test_support::{WINDOW_END, coupon, definition, gbp, mid_window},
    };

    use super::*;

    #[test]
    fn eligible_coupon_has_no_reason() -> TestResult {
        let coupon = coupon(definition());

        let result = evaluate(&coupon, &[], gbp(500), mid_window(), false)?;

        assert!(result.is_eligible());
        assert_eq!(result.reason(), None);

        Ok(())
    }

    #[test]
    fn inactive_is_reported_before_every_other_rule() -> TestResult {
        let base = definition();

        // Every rule fails here; only the first should be reported.
        let coupon = coupon(CouponDefinition {
            status: CouponStatus::Inactive,
            starts_at: base.ends_at,
            usage_limit: Some(1),
            used_count: 1,
            customer_scope: CustomerScope::Existing,
            minimum_booking_amount: Decimal::from(1_000),
            ..base
        });

        let result = evaluate(&coupon, &[], gbp(10), mid_window(), true)?;

        assert_eq!(result, Eligibility::Ineligible(IneligibleReason::Inactive));

        Ok(())
    }

    #[test]
    fn window_is_reported_before_usage_limit() -> TestResult {
        let coupon = coupon(CouponDefinition {
            usage_limit: Some(1),
            used_count: 1,
            ..definition()
        });

        let after =
            Timestamp::from_second(WINDOW_END)?.checked_add(SignedDuration::from_nanos(1))?;
        let result = evaluate(&coupon, &[], gbp(10), after, false)?;

        assert!(matches!(
            result,
            Eligibility::Ineligible(IneligibleReason::Expired { .. })
        ));

        Ok(())
    }

    #[test]
    fn usage_limit_is_reported_before_scope() -> TestResult {
        let coupon = coupon(CouponDefinition {
            usage_limit: Some(5),
            used_count: 5,
            customer_scope: CustomerScope::New,
            ..definition()
        });

        let result = evaluate(&coupon, &[], gbp(10), mid_window(), false)?;

        assert_eq!(
            result,
            Eligibility::Ineligible(IneligibleReason::UsageLimitReached { limit: 5 })
        );

        Ok(())
    }

    #[test]
    fn scope_is_reported_before_minimum_booking() -> TestResult {
        let coupon = coupon(CouponDefinition {
            customer_scope: CustomerScope::Existing,
            minimum_booking_amount: Decimal::from(100),
            ..definition()
        });

        let result = evaluate(&coupon, &[], gbp(10), mid_window(), true)?;

        assert_eq!(
            result,
            Eligibility::Ineligible(IneligibleReason::ExistingCustomersOnly)
        );

        Ok(())
    }

    #[test]
    fn all_scope_accepts_new_and_existing_customers() -> TestResult {
        let coupon = coupon(definition());

        assert!(evaluate(&coupon, &[], gbp(10), mid_window(), true)?.is_eligible());
        assert!(evaluate(&coupon, &[], gbp(10), mid_window(), false)?.is_eligible());

        Ok(())
    }

    #[test]
    fn history_does_not_gate_eligibility() -> TestResult {
        let coupon = coupon(definition());

        let history = [CouponUsageRecord {
            customer_id: CustomerId::new(7),
            coupon_id: CouponId::new(1),
            booking_id: BookingId::new(1),
            used_at: mid_window(),
            discount_amount: gbp(10),
        }];

        let result = evaluate(&coupon, &history, gbp(100), mid_window(), false)?;

        assert!(result.is_eligible());

        Ok(())
    }

    #[test]
    fn currency_mismatch_is_an_error_not_a_reason() {
        let coupon = coupon(definition());

        let result = evaluate(
            &coupon,
            &[],
            Money::from_minor(100, USD),
            mid_window(),
            false,
        );

        assert_eq!(
            result,
            Err(EligibilityError::Money(MoneyError::CurrencyMismatch {
                expected: GBP.iso_alpha_code,
                actual: USD.iso_alpha_code,
            }))
        );
    }

    #[test]
    fn negative_booking_amount_is_an_error() {
        let coupon = coupon(definition());

        let result = evaluate(
            &coupon,
            &[],
            Money::from_minor(-10_000, GBP),
            mid_window(),
            false,
        );

        assert_eq!(
            result,
            Err(EligibilityError::Discount(DiscountError::NegativeAmount(-10_000)))
        );
    }

    #[test]
    fn booking_amount_is_validated_before_status() {
        let coupon = coupon(CouponDefinition {
            status: CouponStatus::Inactive,
            ..definition()
        });

        let mismatch = evaluate(
            &coupon,
            &[],
            Money::from_minor(100, USD),
            mid_window(),
            false,
        );
        let negative = evaluate(&coupon, &[], gbp(-1), mid_window(), false);

        assert!(matches!(mismatch, Err(EligibilityError::Money(_))));
        assert_eq!(
            negative,
            Err(EligibilityError::Discount(DiscountError::NegativeAmount(-100)))
        );
    }

    #[test]
    fn evaluate_booking_uses_context_flag() -> TestResult {
        let coupon = coupon(CouponDefinition {
            customer_scope: CustomerScope::New,
            ..definition()
        });

        let history = UsageHistory::new();
        let returning = BookingContext::new(gbp(100), CustomerId::new(7), false);
        let first_timer = BookingContext::new(gbp(100), CustomerId::new(7), true);

        assert_eq!(
            evaluate_booking(&coupon, &history, &returning, mid_window())?,
            Eligibility::Ineligible(IneligibleReason::NewCustomersOnly)
        );
        assert!(evaluate_booking(&coupon, &history, &first_timer, mid_window())?.is_eligible());

        Ok(())
    }

    #[test]
    fn reasons_render_for_display() -> TestResult {
        let starts_at = Timestamp::from_second(0)?;

        assert_eq!(IneligibleReason::Inactive.to_string(), "coupon inactive");
        assert_eq!(
            IneligibleReason::NotStarted { starts_at }.to_string(),
            "starts on 1970-01-01T00:00:00Z"
        );
        assert_eq!(
            IneligibleReason::Expired { ended_at: starts_at }.to_string(),
            "expired"
        );
        assert_eq!(
            IneligibleReason::UsageLimitReached { limit: 3 }.to_string(),
            "usage limit reached"
        );
        assert_eq!(
            IneligibleReason::NewCustomersOnly.to_string(),
            "for new customers only"
        );
        assert_eq!(
            IneligibleReason::ExistingCustomersOnly.to_string(),
            "for existing customers only"
        );
        assert!(
            IneligibleReason::BelowMinimumBooking { minimum: gbp(100) }
                .to_string()
                .starts_with("minimum booking: ")
        );

        Ok(())
    }
}
