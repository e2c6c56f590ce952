//! End-to-end coupon scenarios for a car rental booking.
//!
//! Each test builds a coupon from a raw definition, evaluates it against a
//! booking and checks the single reason surfaced to the customer.

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, GBP},
};
use testresult::TestResult;

use coupons::prelude::*;

const CUSTOMER: CustomerId = CustomerId::new(7);

fn now() -> Result<Timestamp, jiff::Error> {
    "2026-07-15T12:00:00Z".parse()
}

fn gbp(pounds: i64) -> Money<'static, Currency> {
    Money::from_minor(pounds * 100, GBP)
}

fn definition() -> Result<CouponDefinition<'static>, jiff::Error> {
    Ok(CouponDefinition {
        id: CouponId::new(1),
        code: "SUMMER20".to_string(),
        discount_type: DiscountType::Percentage,
        value: Decimal::from(20),
        currency: GBP,
        starts_at: "2026-06-01T00:00:00Z".parse()?,
        ends_at: "2026-08-31T23:59:59Z".parse()?,
        usage_limit: None,
        used_count: 0,
        minimum_booking_amount: Decimal::ZERO,
        max_discount_amount: Some(Decimal::from(50)),
        customer_scope: CustomerScope::All,
        status: CouponStatus::Active,
    })
}

fn reason(eligibility: Eligibility<'_>) -> Option<String> {
    eligibility.reason().map(ToString::to_string)
}

#[test]
fn capped_percentage_discount() -> TestResult {
    let coupon = Coupon::try_from(definition()?)?;
    let booking = BookingContext::new(gbp(500), CUSTOMER, false);

    let preview = preview(&coupon, &UsageHistory::new(), &booking, now()?)?;
    let applied = preview.applied().ok_or("coupon should apply")?;

    assert_eq!(applied.discount_amount(), gbp(50));
    assert_eq!(applied.final_total(), gbp(450));

    Ok(())
}

#[test]
fn flat_coupon_below_minimum_booking() -> TestResult {
    let coupon = Coupon::try_from(CouponDefinition {
        discount_type: DiscountType::Flat,
        value: Decimal::from(30),
        minimum_booking_amount: Decimal::from(100),
        max_discount_amount: None,
        ..definition()?
    })?;

    let booking = BookingContext::new(gbp(20), CUSTOMER, false);
    let preview = preview(&coupon, &UsageHistory::new(), &booking, now()?)?;

    assert!(!preview.is_eligible());
    assert_eq!(
        preview.eligibility().reason().map(IneligibleReason::rule),
        Some(Rule::MinimumBooking)
    );
    assert_eq!(
        reason(*preview.eligibility()),
        Some(format!("minimum booking: {}", gbp(100)))
    );
    assert_eq!(preview.estimated().discount_amount(), gbp(20));
    assert!(preview.applied().is_none());

    Ok(())
}

#[test]
fn exhausted_usage_limit() -> TestResult {
    let coupon = Coupon::try_from(CouponDefinition {
        usage_limit: Some(5),
        used_count: 5,
        ..definition()?
    })?;

    let result = evaluate(&coupon, &[], gbp(500), now()?, true)?;

    assert_eq!(reason(result).as_deref(), Some("usage limit reached"));
    assert_eq!(coupon.remaining_uses(), Some(0));

    Ok(())
}

#[test]
fn new_customer_coupon_rejects_returning_customer() -> TestResult {
    let coupon = Coupon::try_from(CouponDefinition {
        customer_scope: CustomerScope::New,
        ..definition()?
    })?;

    let used_at: Timestamp = "2026-05-01T10:00:00Z".parse()?;

    let history: UsageHistory<'_> = (1..=3)
        .map(|booking| CouponUsageRecord {
            customer_id: CUSTOMER,
            coupon_id: CouponId::new(90 + booking),
            booking_id: BookingId::new(booking),
            used_at,
            discount_amount: gbp(5),
        })
        .collect();

    let is_new = history.is_new_customer(CUSTOMER);
    let booking = BookingContext::new(gbp(200), CUSTOMER, is_new);

    let result = evaluate_booking(&coupon, &history, &booking, now()?)?;

    assert!(!is_new);
    assert_eq!(reason(result).as_deref(), Some("for new customers only"));

    Ok(())
}

#[test]
fn coupon_not_started_yet() -> TestResult {
    let tomorrow = now()?.checked_add(SignedDuration::from_hours(24))?;

    let coupon = Coupon::try_from(CouponDefinition {
        starts_at: tomorrow,
        ..definition()?
    })?;

    let result = evaluate(&coupon, &[], gbp(500), now()?, false)?;

    assert_eq!(
        reason(result),
        Some("starts on 2026-07-16T12:00:00Z".to_string())
    );

    Ok(())
}

#[test]
fn inactive_coupon_is_rejected_first() -> TestResult {
    let coupon = Coupon::try_from(CouponDefinition {
        status: CouponStatus::Inactive,
        ..definition()?
    })?;

    let result = evaluate(&coupon, &[], gbp(500), now()?, false)?;

    assert_eq!(result, Eligibility::Ineligible(IneligibleReason::Inactive));
    assert_eq!(reason(result).as_deref(), Some("coupon inactive"));

    Ok(())
}

#[test]
fn window_boundaries_are_inclusive() -> TestResult {
    let definition = definition()?;
    let (starts_at, ends_at) = (definition.starts_at, definition.ends_at);
    let coupon = Coupon::try_from(definition)?;

    assert!(evaluate(&coupon, &[], gbp(100), starts_at, false)?.is_eligible());
    assert!(evaluate(&coupon, &[], gbp(100), ends_at, false)?.is_eligible());

    let just_after = ends_at.checked_add(SignedDuration::from_nanos(1))?;

    assert_eq!(
        reason(evaluate(&coupon, &[], gbp(100), just_after, false)?).as_deref(),
        Some("expired")
    );

    Ok(())
}

#[test]
fn confirmed_booking_produces_usage_request() -> TestResult {
    let coupon = Coupon::try_from(definition()?)?;
    let booking = BookingContext::new(gbp(120), CUSTOMER, false);

    let preview = preview(&coupon, &UsageHistory::new(), &booking, now()?)?;
    let request = preview
        .usage_request(BookingId::new(501))
        .ok_or("eligible coupon should produce a usage request")?;

    assert_eq!(request.customer_id, CUSTOMER);
    assert_eq!(request.coupon_id, coupon.id());
    assert_eq!(request.discount_amount, gbp(24));

    Ok(())
}

#[test]
fn invalid_definitions_never_become_coupons() -> TestResult {
    let result = Coupon::try_from(CouponDefinition {
        value: Decimal::from(-5),
        ..definition()?
    });

    assert_eq!(
        result.err(),
        Some(InvalidCouponDefinition::NegativeValue(Decimal::from(-5)))
    );

    Ok(())
}
