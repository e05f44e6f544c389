use serde_json::Value;

use super::wire::{map_list, FieldTable, WireRecord};
use crate::domain::{PaymentStatus, SwapStatus, SwapTransaction};
use crate::shared::AppResult;

pub const SWAP_FIELDS: FieldTable = &[
    (
        "id",
        &["swapTransactionID", "SwapTransactionID", "swapTransactionId", "transactionID", "TransactionID", "swapId", "SwapID", "id", "Id"],
    ),
    ("booking_id", &["bookingID", "BookingID", "bookingId", "BookingId"]),
    ("old_battery_id", &["oldBatteryID", "OldBatteryID", "oldBatteryId", "OldBatteryId"]),
    ("new_battery_id", &["newBatteryID", "NewBatteryID", "newBatteryId", "NewBatteryId"]),
    ("station_id", &["stationID", "StationID", "stationId", "StationId"]),
    ("amount", &["amount", "Amount", "cost", "Cost", "totalAmount", "TotalAmount"]),
    ("payment_status", &["paymentStatus", "PaymentStatus", "Payment.Status"]),
    ("status", &["status", "Status", "swapStatus", "SwapStatus"]),
    ("created_at", &["createdAt", "CreatedAt", "swapTime", "SwapTime"]),
];

pub fn swap_from_wire(value: &Value) -> AppResult<SwapTransaction> {
    let rec = WireRecord::new(value, SWAP_FIELDS, "swap transaction")?;
    Ok(SwapTransaction {
        id: rec.required_string("id")?,
        booking_id: rec.string("booking_id"),
        old_battery_id: rec.string("old_battery_id").unwrap_or_default(),
        new_battery_id: rec.string("new_battery_id").unwrap_or_default(),
        station_id: rec.string("station_id").unwrap_or_default(),
        amount: rec.number("amount").unwrap_or(0.0),
        payment_status: PaymentStatus::from_wire(rec.string("payment_status").as_deref()),
        status: SwapStatus::from_wire(rec.string("status").as_deref()),
        created_at: rec.datetime("created_at"),
    })
}

pub fn swaps_from_wire(value: &Value) -> AppResult<Vec<SwapTransaction>> {
    map_list(value, swap_from_wire)
}
