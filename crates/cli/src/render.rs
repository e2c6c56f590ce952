//! Table rendering

use std::fmt::Write;

use coupons::{
    bookings::BookingContext,
    coupons::{Coupon, CouponDiscount},
    eligibility::{CouponPreview, Eligibility},
    selection::RankedCoupon,
    usage::UsageRequest,
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

/// Render a single coupon check as a two-column table.
pub(crate) fn check(
    coupon: &Coupon<'_>,
    booking: &BookingContext<'_>,
    preview: &CouponPreview<'_>,
    usage_request: Option<&UsageRequest<'_>>,
) -> String {
    let discount = preview.estimated();
    let mut builder = Builder::default();

    builder.push_record(["Coupon", coupon.code()]);
    builder.push_record(["Offer".to_string(), describe(coupon)]);
    builder.push_record(["Booking".to_string(), booking.booking_amount.to_string()]);
    builder.push_record(["Status".to_string(), status(preview.eligibility())]);

    if preview.is_eligible() {
        builder.push_record(["Discount".to_string(), discount.discount_amount().to_string()]);
        builder.push_record(["Total".to_string(), discount.final_total().to_string()]);
    } else {
        builder.push_record([
            "Would save".to_string(),
            discount.discount_amount().to_string(),
        ]);
        builder.push_record(["Total".to_string(), booking.booking_amount.to_string()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::first(), Alignment::left());

    let mut out = table.to_string();

    if let Some(request) = usage_request {
        // Writing to a String cannot fail.
        _ = write!(
            out,
            "\nOn confirmation, record {} against booking {} for customer {} ({})",
            coupon.code(),
            request.booking_id,
            request.customer_id,
            request.discount_amount
        );
    }

    out
}

/// Render ranked coupons, best first.
pub(crate) fn ranking(booking: &BookingContext<'_>, ranked: &[RankedCoupon<'_, '_>]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Code", "Offer", "Discount", "Total", "Status"]);

    for (position, entry) in ranked.iter().enumerate() {
        let discount = entry.preview.estimated();

        let total = if entry.preview.is_eligible() {
            discount.final_total()
        } else {
            booking.booking_amount
        };

        builder.push_record([
            (position + 1).to_string(),
            entry.coupon.code().to_string(),
            describe(entry.coupon),
            discount.discount_amount().to_string(),
            total.to_string(),
            status(entry.preview.eligibility()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    format!(
        "Coupons for customer {} on a {} booking\n{table}",
        booking.customer_id, booking.booking_amount
    )
}

fn describe(coupon: &Coupon<'_>) -> String {
    match coupon.discount() {
        CouponDiscount::Percentage {
            points, cap: None, ..
        } => format!("{points}% off"),
        CouponDiscount::Percentage {
            points,
            cap: Some(cap),
            ..
        } => format!("{points}% off, up to {cap}"),
        CouponDiscount::Flat(value) => format!("{value} off"),
    }
}

fn status(eligibility: &Eligibility<'_>) -> String {
    match eligibility.reason() {
        None => "eligible".to_string(),
        Some(reason) => format!("ineligible: {reason}"),
    }
}
