//! Battery and battery-slot entities

use serde::Serialize;

use crate::domain::status_key;

/// Availability of a battery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatteryStatus {
    Available,
    #[serde(rename = "In-Use")]
    InUse,
    Charging,
    Maintenance,
    Damaged,
}

impl BatteryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InUse => "In-Use",
            Self::Charging => "Charging",
            Self::Maintenance => "Maintenance",
            Self::Damaged => "Damaged",
        }
    }

    /// Backend spelling (no hyphen)
    pub fn wire_status(&self) -> &'static str {
        match self {
            Self::InUse => "InUse",
            other => other.as_str(),
        }
    }

    /// Unknown or missing values fall back to `Available`.
    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(status_key).as_deref() {
            Some("inuse") | Some("used") | Some("1") => Self::InUse,
            Some("charging") | Some("2") => Self::Charging,
            Some("maintenance") | Some("3") => Self::Maintenance,
            Some("damaged") | Some("faulty") | Some("4") => Self::Damaged,
            _ => Self::Available,
        }
    }

    pub fn is_swappable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Where the battery physically is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatteryLocation {
    Idle,
    InSlot,
    InVehicle,
}

impl BatteryLocation {
    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(status_key).as_deref() {
            Some("inslot") | Some("slot") | Some("station") => Self::InSlot,
            Some("invehicle") | Some("vehicle") => Self::InVehicle,
            _ => Self::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Battery {
    pub id: String,
    pub type_id: Option<String>,
    pub serial_number: Option<String>,
    /// State of health, percent
    pub soh: Option<f64>,
    /// Charge level, percent
    pub charge: Option<f64>,
    pub station_id: Option<String>,
    pub location: BatteryLocation,
    pub status: BatteryStatus,
}

/// Status of a station slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotStatus {
    Empty,
    Occupied,
    Charging,
    Maintenance,
    Error,
}

impl SlotStatus {
    /// Unknown or missing values fall back to `Empty`.
    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(status_key).as_deref() {
            Some("occupied") | Some("full") | Some("1") => Self::Occupied,
            Some("charging") | Some("2") => Self::Charging,
            Some("maintenance") | Some("3") => Self::Maintenance,
            Some("error") | Some("fault") | Some("4") => Self::Error,
            _ => Self::Empty,
        }
    }

    /// Whether a slot in this status holds a battery.
    pub fn holds_battery(&self) -> bool {
        matches!(self, Self::Occupied | Self::Charging)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterySlot {
    pub id: String,
    pub station_id: String,
    pub slot_number: i32,
    pub battery_id: Option<String>,
    pub status: SlotStatus,
}

impl BatterySlot {
    /// A slot references a battery iff it is occupied or charging.
    pub fn is_consistent(&self) -> bool {
        self.battery_id.is_some() == self.status.holds_battery()
    }
}

/// Condition report written against a battery, e.g. after it leaves a vehicle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConditionLog {
    #[serde(rename = "BatteryID")]
    pub battery_id: String,
    #[serde(rename = "SoH", skip_serializing_if = "Option::is_none")]
    pub soh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
