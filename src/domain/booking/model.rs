//! Booking domain entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::status_key;

/// Booking status as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingStatus {
    /// Reserved, waiting for the customer to arrive
    Pending,
    /// Checked in by station staff
    Checked,
    /// Swap done
    Completed,
    /// Cancelled by customer or staff
    Cancelled,
}

/// The three statuses customer-facing screens distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiBookingStatus {
    Pending,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Checked => "Checked",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parse a backend status. Unknown or missing values fall back to `Pending`.
    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(status_key).as_deref() {
            Some("checked") | Some("checkedin") | Some("inprogress") | Some("1") => Self::Checked,
            Some("completed") | Some("done") | Some("2") => Self::Completed,
            Some("cancelled") | Some("canceled") | Some("3") => Self::Cancelled,
            // "confirmed" is a legacy spelling of a reservation that is still open
            _ => Self::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn ui_status(&self) -> UiBookingStatus {
        match self {
            Self::Pending | Self::Checked => UiBookingStatus::Pending,
            Self::Completed => UiBookingStatus::Completed,
            Self::Cancelled => UiBookingStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize any backend booking status string straight to its UI status.
pub fn normalize_ui_status(raw: Option<&str>) -> UiBookingStatus {
    BookingStatus::from_wire(raw).ui_status()
}

/// A customer's reserved swap slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub vehicle_id: Option<String>,
    pub vehicle_plate: Option<String>,
    pub station_id: String,
    pub battery_type_id: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: BookingStatus,
}

impl Booking {
    pub fn can_check_in(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Payload for creating a booking from the customer side
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewBooking {
    #[serde(rename = "UserID")]
    pub customer_id: String,
    #[serde(rename = "VehicleID")]
    pub vehicle_id: String,
    #[serde(rename = "StationID")]
    pub station_id: String,
    #[serde(rename = "BatteryTypeID", skip_serializing_if = "Option::is_none")]
    pub battery_type_id: Option<String>,
    pub booking_time: DateTime<Utc>,
}
