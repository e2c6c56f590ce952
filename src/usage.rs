//! Coupon Usage
//!
//! Read-only view over recorded redemptions. Records are appended by the
//! external usage recorder; the engine only aggregates them.

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    bookings::{BookingId, CustomerId},
    coupons::CouponId,
    discounts::DiscountResult,
};

/// A coupon redeemed against a booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponUsageRecord<'a> {
    /// Customer who redeemed the coupon
    pub customer_id: CustomerId,

    /// Coupon that was redeemed
    pub coupon_id: CouponId,

    /// Booking the coupon was redeemed against
    pub booking_id: BookingId,

    /// When the redemption was recorded
    pub used_at: Timestamp,

    /// Discount granted by the redemption
    pub discount_amount: Money<'a, Currency>,
}

/// Usage history indexed by customer.
///
/// Records are assumed unique per `(customer, coupon, booking)`; duplicates are
/// kept as given.
#[derive(Debug, Clone, Default)]
pub struct UsageHistory<'a> {
    by_customer: FxHashMap<CustomerId, Vec<CouponUsageRecord<'a>>>,
    len: usize,
}

impl<'a> UsageHistory<'a> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, record: CouponUsageRecord<'a>) {
        self.by_customer
            .entry(record.customer_id)
            .or_default()
            .push(record);

        self.len += 1;
    }

    /// Number of records across all customers.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no redemptions have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over every record.
    pub fn records(&self) -> impl Iterator<Item = &CouponUsageRecord<'a>> {
        self.by_customer.values().flatten()
    }

    /// Records belonging to one customer, in the order they were added.
    pub fn for_customer(&self, customer_id: CustomerId) -> &[CouponUsageRecord<'a>] {
        self.by_customer
            .get(&customer_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of coupons a customer has redeemed.
    pub fn redemptions_by(&self, customer_id: CustomerId) -> usize {
        self.for_customer(customer_id).len()
    }

    /// Whether a customer has never redeemed any coupon.
    ///
    /// This treats "never used a coupon" as "new", so a regular customer who
    /// has never used a coupon counts as new. Prefer the booking service's own
    /// flag where one is available.
    pub fn is_new_customer(&self, customer_id: CustomerId) -> bool {
        self.redemptions_by(customer_id) == 0
    }

    /// Whether a customer has already redeemed a specific coupon.
    pub fn has_redeemed(&self, customer_id: CustomerId, coupon_id: CouponId) -> bool {
        self.for_customer(customer_id)
            .iter()
            .any(|record| record.coupon_id == coupon_id)
    }

    /// Number of times a coupon has been redeemed by anyone in this history.
    pub fn redemptions_of(&self, coupon_id: CouponId) -> usize {
        self.records()
            .filter(|record| record.coupon_id == coupon_id)
            .count()
    }

    /// Total discount granted by a coupon across this history.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if any matching record is in another currency.
    pub fn total_discount_for(
        &self,
        coupon_id: CouponId,
        currency: &'a Currency,
    ) -> Result<Money<'a, Currency>, MoneyError> {
        self.records()
            .filter(|record| record.coupon_id == coupon_id)
            .try_fold(Money::from_minor(0, currency), |acc, record| {
                acc.add(record.discount_amount)
            })
    }
}

impl<'a> FromIterator<CouponUsageRecord<'a>> for UsageHistory<'a> {
    fn from_iter<I: IntoIterator<Item = CouponUsageRecord<'a>>>(iter: I) -> Self {
        let mut history = Self::new();

        history.extend(iter);

        history
    }
}

impl<'a> Extend<CouponUsageRecord<'a>> for UsageHistory<'a> {
    fn extend<I: IntoIterator<Item = CouponUsageRecord<'a>>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

/// Payload handed to the external usage recorder once a booking is confirmed.
///
/// The recorder is responsible for checking the usage limit and incrementing
/// the coupon's redemption counter in one transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageRequest<'a> {
    /// Customer redeeming the coupon
    pub customer_id: CustomerId,

    /// Coupon being redeemed
    pub coupon_id: CouponId,

    /// Confirmed booking
    pub booking_id: BookingId,

    /// Discount granted
    pub discount_amount: Money<'a, Currency>,
}

impl<'a> UsageRequest<'a> {
    /// Build the payload from a calculated discount.
    pub fn new(
        customer_id: CustomerId,
        coupon_id: CouponId,
        booking_id: BookingId,
        discount: &DiscountResult<'a>,
    ) -> Self {
        Self {
            customer_id,
            coupon_id,
            booking_id,
            discount_amount: discount.discount_amount(),
        }
    }
}

/// Errors raised by the in-memory recorder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    /// The coupon is already recorded against this booking for this customer.
    #[error(
        "coupon {coupon_id} already redeemed by customer {customer_id} on booking {booking_id}"
    )]
    DuplicateRedemption {
        /// Customer redeeming the coupon
        customer_id: CustomerId,

        /// Coupon being redeemed
        coupon_id: CouponId,

        /// Booking the coupon was redeemed against
        booking_id: BookingId,
    },
}

/// Persists redemptions once a booking is confirmed.
///
/// Implementors own the coupon's redemption counter: checking the usage limit
/// and incrementing `used_count` must happen in the same transaction as storing
/// the record (reserve, then commit).
pub trait UsageRecorder<'a> {
    /// Error raised when the redemption cannot be stored.
    type Error;

    /// Store a redemption made at `used_at`.
    ///
    /// # Errors
    ///
    /// Returns an implementation-specific error if the redemption is rejected.
    fn record(
        &mut self,
        request: UsageRequest<'a>,
        used_at: Timestamp,
    ) -> Result<CouponUsageRecord<'a>, Self::Error>;
}

impl<'a> UsageRecorder<'a> for UsageHistory<'a> {
    type Error = UsageError;

    fn record(
        &mut self,
        request: UsageRequest<'a>,
        used_at: Timestamp,
    ) -> Result<CouponUsageRecord<'a>, Self::Error> {
        let duplicate = self
            .for_customer(request.customer_id)
            .iter()
            .any(|record| {
                record.coupon_id == request.coupon_id && record.booking_id == request.booking_id
            });

        if duplicate {
            return Err(UsageError::DuplicateRedemption {
                customer_id: request.customer_id,
                coupon_id: request.coupon_id,
                booking_id: request.booking_id,
            });
        }

        let record = CouponUsageRecord {
            customer_id: request.customer_id,
            coupon_id: request.coupon_id,
            booking_id: request.booking_id,
            used_at,
            discount_amount: request.discount_amount,
        };

        self.push(record);

        debug!(
            customer_id = %record.customer_id,
            coupon_id = %record.coupon_id,
            booking_id = %record.booking_id,
            "coupon redemption recorded"
        );

        Ok(record)
    }
}
