use serde_json::Value;

use super::wire::{FieldTable, WireRecord};
use crate::domain::{Payment, PaymentMethod, PaymentStatus};
use crate::shared::AppResult;

pub const PAYMENT_FIELDS: FieldTable = &[
    ("id", &["paymentID", "PaymentID", "paymentId", "PaymentId", "id", "Id"]),
    ("user_id", &["userID", "UserID", "userId", "UserId"]),
    ("booking_id", &["bookingID", "BookingID", "bookingId", "BookingId"]),
    ("swap_id", &["swapID", "SwapID", "swapId", "swapTransactionId", "SwapTransactionID"]),
    ("amount", &["amount", "Amount", "totalAmount", "TotalAmount"]),
    ("method", &["paymentMethod", "PaymentMethod", "method", "Method"]),
    ("status", &["status", "Status", "paymentStatus", "PaymentStatus"]),
    (
        "checkout_url",
        &["checkoutUrl", "CheckoutUrl", "paymentUrl", "PaymentUrl", "paymentLink", "PaymentLink", "url"],
    ),
];

pub fn payment_from_wire(value: &Value) -> AppResult<Payment> {
    let rec = WireRecord::new(value, PAYMENT_FIELDS, "payment")?;
    Ok(Payment {
        id: rec.required_string("id")?,
        user_id: rec.string("user_id"),
        booking_id: rec.string("booking_id"),
        swap_id: rec.string("swap_id"),
        amount: rec.number("amount").unwrap_or(0.0),
        method: PaymentMethod::from_wire(rec.string("method").as_deref()),
        status: PaymentStatus::from_wire(rec.string("status").as_deref()),
        checkout_url: rec.string("checkout_url"),
    })
}

/// The payment-link endpoint answers with either a bare URL string or an
/// object carrying it.
pub fn checkout_url_from_wire(value: &Value) -> AppResult<String> {
    if let Value::String(url) = value {
        return Ok(url.clone());
    }
    WireRecord::new(value, PAYMENT_FIELDS, "payment link")?.required_string("checkout_url")
}
