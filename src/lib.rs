//! Coupons
//!
//! Coupon eligibility and discount engine for car rental bookings: validates
//! coupon definitions, decides whether a coupon applies to a booking, and
//! calculates the resulting discount.

pub mod bookings;
pub mod coupons;
pub mod discounts;
pub mod eligibility;
pub mod fixtures;
pub mod ids;
pub mod prelude;
pub mod selection;
pub mod usage;

#[cfg(test)]
mod test_support;
