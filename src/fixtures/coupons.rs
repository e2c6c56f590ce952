//! Coupon Fixtures

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    coupons::{Coupon, CouponDefinition, CouponId, CouponStatus, CustomerScope, DiscountType},
    fixtures::{FixtureError, parse_amount, parse_currency},
};

/// Wrapper for coupons in YAML
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// Coupon fixtures, in file order
    pub coupons: Vec<CouponFixture>,
}

/// Coupon fixture from YAML
///
/// Amounts are strings in major units (e.g. `"12.50"`) so they survive YAML
/// without float rounding.
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Coupon id
    pub id: u64,

    /// Human-facing code
    pub code: String,

    /// `percentage` or `flat`
    pub discount_type: String,

    /// Discount magnitude
    pub value: String,

    /// ISO currency code
    pub currency: String,

    /// First instant the coupon may be used
    pub starts_at: Timestamp,

    /// Last instant the coupon may be used
    pub ends_at: Timestamp,

    /// Global redemption limit
    #[serde(default)]
    pub usage_limit: Option<u32>,

    /// Redemptions recorded so far
    #[serde(default)]
    pub used_count: u32,

    /// Smallest booking amount the coupon applies to
    #[serde(default)]
    pub minimum_booking: Option<String>,

    /// Upper bound on a percentage discount
    #[serde(default)]
    pub max_discount: Option<String>,

    /// Which customers may use the coupon
    #[serde(default = "default_scope")]
    pub customer_scope: CustomerScope,

    /// On/off switch
    #[serde(default = "default_status")]
    pub status: CouponStatus,
}

fn default_scope() -> CustomerScope {
    CustomerScope::All
}

fn default_status() -> CouponStatus {
    CouponStatus::Active
}

impl TryFrom<CouponFixture> for CouponDefinition<'static> {
    type Error = FixtureError;

    fn try_from(fixture: CouponFixture) -> Result<Self, Self::Error> {
        let invalid = |source| FixtureError::InvalidCoupon {
            code: fixture.code.clone(),
            source,
        };

        let discount_type = fixture
            .discount_type
            .parse::<DiscountType>()
            .map_err(invalid)?;

        let minimum_booking_amount = match &fixture.minimum_booking {
            Some(amount) => parse_amount(amount)?,
            None => Decimal::ZERO,
        };

        let max_discount_amount = fixture
            .max_discount
            .as_deref()
            .map(parse_amount)
            .transpose()?;

        Ok(CouponDefinition {
            id: CouponId::new(fixture.id),
            discount_type,
            value: parse_amount(&fixture.value)?,
            currency: parse_currency(&fixture.currency)?,
            starts_at: fixture.starts_at,
            ends_at: fixture.ends_at,
            usage_limit: fixture.usage_limit,
            used_count: fixture.used_count,
            minimum_booking_amount,
            max_discount_amount,
            customer_scope: fixture.customer_scope,
            status: fixture.status,
            code: fixture.code,
        })
    }
}

impl TryFrom<CouponFixture> for Coupon<'static> {
    type Error = FixtureError;

    fn try_from(fixture: CouponFixture) -> Result<Self, Self::Error> {
        let definition = CouponDefinition::try_from(fixture)?;
        let code = definition.code.clone();

        Coupon::try_from(definition).map_err(|source| FixtureError::InvalidCoupon { code, source })
    }
}
