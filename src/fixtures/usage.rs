//! Usage Fixtures

use jiff::Timestamp;
use serde::Deserialize;

use crate::{
    bookings::{BookingId, CustomerId},
    coupons::CouponId,
    fixtures::{FixtureError, parse_price},
    usage::CouponUsageRecord,
};

/// Wrapper for usage history in YAML
#[derive(Debug, Deserialize)]
pub struct UsageFixture {
    /// Redemption records
    #[serde(default)]
    pub usage: Vec<UsageRecordFixture>,
}

/// Redemption record from YAML
#[derive(Debug, Deserialize)]
pub struct UsageRecordFixture {
    /// Customer who redeemed the coupon
    pub customer_id: u64,

    /// Coupon redeemed
    pub coupon_id: u64,

    /// Booking the coupon was redeemed against
    pub booking_id: u64,

    /// When the redemption was recorded
    pub used_at: Timestamp,

    /// Discount granted, e.g. "25.00 GBP"
    pub discount_amount: String,
}

impl TryFrom<UsageRecordFixture> for CouponUsageRecord<'static> {
    type Error = FixtureError;

    fn try_from(fixture: UsageRecordFixture) -> Result<Self, Self::Error> {
        Ok(CouponUsageRecord {
            customer_id: CustomerId::new(fixture.customer_id),
            coupon_id: CouponId::new(fixture.coupon_id),
            booking_id: BookingId::new(fixture.booking_id),
            used_at: fixture.used_at,
            discount_amount: parse_price(&fixture.discount_amount)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn converts_record() -> TestResult {
        let fixture: UsageRecordFixture = serde_norway::from_str(
            r#"
customer_id: 7
coupon_id: 1
booking_id: 1001
used_at: "2026-06-10T09:30:00Z"
discount_amount: "25.00 GBP"
"#,
        )?;

        let record = CouponUsageRecord::try_from(fixture)?;

        assert_eq!(record.customer_id, CustomerId::new(7));
        assert_eq!(record.discount_amount, Money::from_minor(2500, GBP));
        assert_eq!(record.used_at, "2026-06-10T09:30:00Z".parse::<Timestamp>()?);

        Ok(())
    }

    #[test]
    fn empty_file_has_no_records() -> TestResult {
        let fixture: UsageFixture = serde_norway::from_str("usage: []\n")?;

        assert!(fixture.usage.is_empty());

        Ok(())
    }

    #[test]
    fn malformed_amount_is_rejected() -> TestResult {
        let fixture = UsageRecordFixture {
            customer_id: 1,
            coupon_id: 1,
            booking_id: 1,
            used_at: Timestamp::UNIX_EPOCH,
            discount_amount: "25.00".to_string(),
        };

        assert!(matches!(
            CouponUsageRecord::try_from(fixture),
            Err(FixtureError::InvalidPrice(_))
        ));

        Ok(())
    }
}
