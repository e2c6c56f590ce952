//! Fixtures
//!
//! YAML loading of coupon definitions and usage history. Files live under a
//! base directory as `coupons/<name>.yml` and `usage/<name>.yml`.

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Findable, Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    coupons::{Coupon, CouponId, InvalidCouponDefinition},
    discounts::major_to_minor,
    fixtures::{coupons::CouponsFixture, usage::UsageFixture},
    usage::{CouponUsageRecord, UsageHistory},
};

pub mod coupons;
pub mod usage;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid amount format
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Coupon definition failed validation
    #[error("Invalid coupon {code}: {source}")]
    InvalidCoupon {
        /// Code of the offending coupon
        code: String,

        /// Validation failure
        #[source]
        source: InvalidCouponDefinition,
    },

    /// Two coupons share an id
    #[error("Duplicate coupon id: {0}")]
    DuplicateCoupon(CouponId),

    /// Coupon not found
    #[error("Coupon not found: {0}")]
    CouponNotFound(CouponId),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Validated coupons, in file order
    coupons: Vec<Coupon<'static>>,

    /// Usage history
    usage: UsageHistory<'static>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            coupons: Vec::new(),
            usage: UsageHistory::new(),
        }
    }

    /// Load coupons from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a coupon
    /// definition is invalid, or if a coupon id is repeated. Nothing from the
    /// file is kept when an error is returned.
    pub fn load_coupons(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("coupons").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CouponsFixture = serde_norway::from_str(&contents)?;

        let mut seen: FxHashSet<CouponId> = self.coupons.iter().map(Coupon::id).collect();
        let mut loaded = Vec::with_capacity(fixture.coupons.len());

        for coupon_fixture in fixture.coupons {
            let coupon = Coupon::try_from(coupon_fixture)?;

            if !seen.insert(coupon.id()) {
                return Err(FixtureError::DuplicateCoupon(coupon.id()));
            }

            loaded.push(coupon);
        }

        self.coupons.extend(loaded);

        debug!(path = %file_path.display(), coupons = self.coupons.len(), "loaded coupon fixtures");

        Ok(self)
    }

    /// Load usage history from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a recorded
    /// discount amount is malformed. Nothing from the file is kept when an
    /// error is returned.
    pub fn load_usage(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("usage").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: UsageFixture = serde_norway::from_str(&contents)?;

        let records = fixture
            .usage
            .into_iter()
            .map(CouponUsageRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        self.usage.extend(records);

        debug!(path = %file_path.display(), records = self.usage.len(), "loaded usage fixtures");

        Ok(self)
    }

    /// Load coupons and usage history sharing the same name
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_coupons(name)?.load_usage(name)?;

        Ok(fixture)
    }

    /// Get a coupon by id
    ///
    /// # Errors
    ///
    /// Returns an error if the coupon is not found.
    pub fn coupon(&self, id: CouponId) -> Result<&Coupon<'static>, FixtureError> {
        self.coupons
            .iter()
            .find(|coupon| coupon.id() == id)
            .ok_or(FixtureError::CouponNotFound(id))
    }

    /// Get all coupons
    pub fn coupons(&self) -> &[Coupon<'static>] {
        &self.coupons
    }

    /// Get the usage history
    pub fn usage(&self) -> &UsageHistory<'static> {
        &self.usage
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up an ISO currency by its alphabetic code (e.g. "GBP").
///
/// # Errors
///
/// Returns an error if the code is not a known ISO currency.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    Currency::find(code.trim()).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))
}

/// Parse a decimal amount in major units (e.g. "12.50").
///
/// # Errors
///
/// Returns an error if the string is not a decimal number.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidAmount(s.to_string()))
}

/// Parse price string (e.g., "2.99 GBP") into money
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(currency_code)?;

    let minor_units = major_to_minor(amount, currency)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}
