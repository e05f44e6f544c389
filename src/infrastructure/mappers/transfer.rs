use serde_json::Value;

use super::wire::{map_list, FieldTable, WireRecord};
use crate::domain::{BatteryTransfer, TransferStatus};
use crate::shared::AppResult;

pub const TRANSFER_FIELDS: FieldTable = &[
    ("id", &["transferID", "TransferID", "transferId", "TransferId", "id", "Id"]),
    ("battery_id", &["batteryID", "BatteryID", "batteryId", "BatteryId"]),
    ("from_station_id", &["fromStationID", "FromStationID", "fromStationId", "FromStationId"]),
    ("to_station_id", &["toStationID", "ToStationID", "toStationId", "ToStationId"]),
    ("status", &["status", "Status", "transferStatus", "TransferStatus"]),
];

pub fn transfer_from_wire(value: &Value) -> AppResult<BatteryTransfer> {
    let rec = WireRecord::new(value, TRANSFER_FIELDS, "battery transfer")?;
    Ok(BatteryTransfer {
        id: rec.required_string("id")?,
        battery_id: rec.string("battery_id").unwrap_or_default(),
        from_station_id: rec.string("from_station_id"),
        to_station_id: rec.string("to_station_id"),
        status: TransferStatus::from_wire(rec.string("status").as_deref()),
    })
}

pub fn transfers_from_wire(value: &Value) -> AppResult<Vec<BatteryTransfer>> {
    map_list(value, transfer_from_wire)
}
