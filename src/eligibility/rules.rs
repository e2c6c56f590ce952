//! Eligibility Rules

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};

use crate::{
    coupons::{Coupon, CustomerScope},
    eligibility::IneligibleReason,
};

/// A single eligibility condition.
///
/// Rules are checked in [`Rule::ORDER`] and the first failing rule decides the
/// reason reported to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The coupon must be switched on.
    Status,

    /// `now` must fall within the inclusive validity window.
    ValidityWindow,

    /// The global redemption limit must not be exhausted.
    UsageLimit,

    /// The customer must match the coupon's customer scope.
    CustomerScope,

    /// The booking must reach the coupon's minimum amount.
    MinimumBooking,
}

/// Inputs a rule is checked against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<'a> {
    pub(crate) booking_amount: Money<'a, Currency>,
    pub(crate) now: Timestamp,
    pub(crate) is_new_customer: bool,
}

impl Rule {
    /// Rules in the order they are checked.
    pub const ORDER: [Self; 5] = [
        Self::Status,
        Self::ValidityWindow,
        Self::UsageLimit,
        Self::CustomerScope,
        Self::MinimumBooking,
    ];

    /// Return the rule name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::ValidityWindow => "validity_window",
            Self::UsageLimit => "usage_limit",
            Self::CustomerScope => "customer_scope",
            Self::MinimumBooking => "minimum_booking",
        }
    }

    /// Check the rule, returning the reason it fails, if it does.
    ///
    /// The candidate's booking amount must already be in the coupon's currency.
    pub(crate) fn check<'a>(
        self,
        coupon: &Coupon<'a>,
        candidate: &Candidate<'a>,
    ) -> Option<IneligibleReason<'a>> {
        match self {
            Self::Status => (!coupon.is_active()).then_some(IneligibleReason::Inactive),
            Self::ValidityWindow => {
                if candidate.now < coupon.starts_at() {
                    Some(IneligibleReason::NotStarted {
                        starts_at: coupon.starts_at(),
                    })
                } else if candidate.now > coupon.ends_at() {
                    Some(IneligibleReason::Expired {
                        ended_at: coupon.ends_at(),
                    })
                } else {
                    None
                }
            }
            Self::UsageLimit => coupon
                .usage_limit()
                .filter(|limit| coupon.used_count() >= *limit)
                .map(|limit| IneligibleReason::UsageLimitReached { limit }),
            Self::CustomerScope => match (coupon.customer_scope(), candidate.is_new_customer) {
                (CustomerScope::New, false) => Some(IneligibleReason::NewCustomersOnly),
                (CustomerScope::Existing, true) => Some(IneligibleReason::ExistingCustomersOnly),
                _ => None,
            },
            Self::MinimumBooking => {
                let minimum = coupon.minimum_booking();

                (candidate.booking_amount.to_minor_units() < minimum.to_minor_units())
                    .then_some(IneligibleReason::BelowMinimumBooking { minimum })
            }
        }
    }
}
