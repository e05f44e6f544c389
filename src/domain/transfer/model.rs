//! Battery transfer entity

use serde::Serialize;

use crate::domain::status_key;

/// Transfer status in the portal's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferStatus {
    Pending,
    #[serde(rename = "In-Transit")]
    InTransit,
    Completed,
    Cancelled,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InTransit => "In-Transit",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parse either vocabulary. Unknown or missing values fall back to `Pending`.
    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(status_key).as_deref() {
            Some("intransit") | Some("shipping") | Some("1") => Self::InTransit,
            Some("delivered") | Some("completed") | Some("2") => Self::Completed,
            Some("cancelled") | Some("canceled") | Some("3") => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

/// Translate a portal status to the backend's spelling.
///
/// `In-Transit` becomes `InTransit` and `Completed` becomes `Delivered`;
/// every other value is sent unchanged.
pub fn transfer_wire_status(status: &str) -> &str {
    match status {
        "In-Transit" => "InTransit",
        "Completed" => "Delivered",
        other => other,
    }
}

/// Movement of a battery between two stations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryTransfer {
    pub id: String,
    pub battery_id: String,
    pub from_station_id: Option<String>,
    pub to_station_id: Option<String>,
    pub status: TransferStatus,
}

/// Payload for requesting a transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBatteryTransfer {
    #[serde(rename = "BatteryID")]
    pub battery_id: String,
    #[serde(rename = "FromStationID")]
    pub from_station_id: String,
    #[serde(rename = "ToStationID")]
    pub to_station_id: String,
}
