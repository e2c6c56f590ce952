//! Bookings
//!
//! The slice of a booking the coupon engine needs to see. Bookings and
//! customers are owned by the booking service; only their ids travel here.

use rusty_money::{Money, iso::Currency};

use crate::ids::TypedId;

/// Marker for customer ids.
#[derive(Debug)]
pub enum Customer {}

/// Marker for booking ids.
#[derive(Debug)]
pub enum Booking {}

/// Customer Id
pub type CustomerId = TypedId<Customer>;

/// Booking Id
pub type BookingId = TypedId<Booking>;

/// Candidate booking a coupon is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingContext<'a> {
    /// Booking amount before any discount
    pub booking_amount: Money<'a, Currency>,

    /// Customer making the booking
    pub customer_id: CustomerId,

    /// Whether the customer counts as new, as decided by the customer service
    pub is_new_customer: bool,
}

impl<'a> BookingContext<'a> {
    /// Create a booking context.
    pub fn new(
        booking_amount: Money<'a, Currency>,
        customer_id: CustomerId,
        is_new_customer: bool,
    ) -> Self {
        Self {
            booking_amount,
            customer_id,
            is_new_customer,
        }
    }
}
