use serde_json::Value;

use super::wire::{map_list, FieldTable, WireRecord};
use crate::domain::{Battery, BatteryLocation, BatterySlot, BatteryStatus, SlotStatus};
use crate::shared::AppResult;

pub const BATTERY_FIELDS: FieldTable = &[
    ("id", &["batteryID", "BatteryID", "batteryId", "BatteryId", "id", "Id"]),
    ("type_id", &["batteryTypeID", "BatteryTypeID", "batteryTypeId", "typeId", "TypeID"]),
    ("serial_number", &["serialNumber", "SerialNumber", "serial", "Serial"]),
    ("soh", &["soH", "SoH", "soh", "SOH", "stateOfHealth", "StateOfHealth"]),
    ("charge", &["percentage", "Percentage", "chargeLevel", "ChargeLevel", "soc", "SoC", "SOC"]),
    ("station_id", &["stationID", "StationID", "stationId", "StationId"]),
    ("location", &["location", "Location", "locationStatus", "LocationStatus"]),
    ("status", &["status", "Status", "batteryStatus", "BatteryStatus"]),
];

pub const SLOT_FIELDS: FieldTable = &[
    ("id", &["slotID", "SlotID", "slotId", "SlotId", "batterySlotId", "BatterySlotID", "id", "Id"]),
    ("station_id", &["stationID", "StationID", "stationId", "StationId"]),
    ("slot_number", &["slotNumber", "SlotNumber", "position", "Position", "number"]),
    ("battery_id", &["batteryID", "BatteryID", "batteryId", "BatteryId", "Battery.BatteryID"]),
    ("status", &["status", "Status", "slotStatus", "SlotStatus"]),
];

pub fn battery_from_wire(value: &Value) -> AppResult<Battery> {
    let rec = WireRecord::new(value, BATTERY_FIELDS, "battery")?;
    Ok(Battery {
        id: rec.required_string("id")?,
        type_id: rec.string("type_id"),
        serial_number: rec.string("serial_number"),
        soh: rec.number("soh"),
        charge: rec.number("charge"),
        station_id: rec.string("station_id"),
        location: BatteryLocation::from_wire(rec.string("location").as_deref()),
        status: BatteryStatus::from_wire(rec.string("status").as_deref()),
    })
}

pub fn batteries_from_wire(value: &Value) -> AppResult<Vec<Battery>> {
    map_list(value, battery_from_wire)
}

/// A stray battery id on a slot that cannot hold one is dropped so the
/// slot invariant holds for every mapped value.
pub fn slot_from_wire(value: &Value) -> AppResult<BatterySlot> {
    let rec = WireRecord::new(value, SLOT_FIELDS, "battery slot")?;
    let status = SlotStatus::from_wire(rec.string("status").as_deref());
    let battery_id = rec.string("battery_id").filter(|_| status.holds_battery());
    Ok(BatterySlot {
        id: rec.required_string("id")?,
        station_id: rec.string("station_id").unwrap_or_default(),
        slot_number: rec.integer("slot_number").unwrap_or_default() as i32,
        battery_id,
        status,
    })
}

pub fn slots_from_wire(value: &Value) -> AppResult<Vec<BatterySlot>> {
    map_list(value, slot_from_wire)
}
