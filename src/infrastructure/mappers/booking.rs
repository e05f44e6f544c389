use serde_json::Value;

use super::wire::{map_list, FieldTable, WireRecord};
use crate::domain::{Booking, BookingStatus};
use crate::shared::AppResult;

pub const BOOKING_FIELDS: FieldTable = &[
    ("id", &["bookingID", "BookingID", "bookingId", "BookingId", "id", "Id"]),
    (
        "customer_id",
        &["userID", "UserID", "userId", "UserId", "customerId", "CustomerID", "driverId"],
    ),
    (
        "customer_name",
        &["customerName", "CustomerName", "userName", "UserName", "fullName", "FullName", "User.FullName", "user.fullName"],
    ),
    (
        "customer_phone",
        &["customerPhone", "CustomerPhone", "phone", "Phone", "phoneNumber", "PhoneNumber", "User.Phone", "user.phone"],
    ),
    ("vehicle_id", &["vehicleID", "VehicleID", "vehicleId", "VehicleId"]),
    (
        "vehicle_plate",
        &["licensePlate", "LicensePlate", "vehiclePlate", "Vehicle.LicensePlate", "vehicle.licensePlate"],
    ),
    ("station_id", &["stationID", "StationID", "stationId", "StationId"]),
    (
        "battery_type_id",
        &["batteryTypeID", "BatteryTypeID", "batteryTypeId", "BatteryTypeId"],
    ),
    (
        "scheduled_at",
        &["bookingTime", "BookingTime", "scheduledTime", "ScheduledTime", "timeSlot", "TimeSlot", "bookingDate", "BookingDate"],
    ),
    ("status", &["status", "Status", "bookingStatus", "BookingStatus"]),
];

pub fn booking_from_wire(value: &Value) -> AppResult<Booking> {
    let rec = WireRecord::new(value, BOOKING_FIELDS, "booking")?;
    Ok(Booking {
        id: rec.required_string("id")?,
        customer_id: rec.string("customer_id").unwrap_or_default(),
        customer_name: rec.string("customer_name"),
        customer_phone: rec.string("customer_phone"),
        vehicle_id: rec.string("vehicle_id"),
        vehicle_plate: rec.string("vehicle_plate"),
        station_id: rec.string("station_id").unwrap_or_default(),
        battery_type_id: rec.string("battery_type_id"),
        scheduled_at: rec.datetime("scheduled_at"),
        status: BookingStatus::from_wire(rec.string("status").as_deref()),
    })
}

pub fn bookings_from_wire(value: &Value) -> AppResult<Vec<Booking>> {
    map_list(value, booking_from_wire)
}
