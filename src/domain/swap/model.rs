//! Swap transaction entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::payment::PaymentStatus;
use crate::domain::status_key;
use crate::shared::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwapStatus {
    Pending,
    Completed,
    Cancelled,
}

impl SwapStatus {
    /// Unknown or missing values fall back to `Pending`.
    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(status_key).as_deref() {
            Some("completed") | Some("success") | Some("1") => Self::Completed,
            Some("cancelled") | Some("canceled") | Some("2") => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

/// Record of one battery exchange
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTransaction {
    pub id: String,
    pub booking_id: Option<String>,
    pub old_battery_id: String,
    pub new_battery_id: String,
    pub station_id: String,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub status: SwapStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for starting a swap
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewSwapTransaction {
    #[serde(rename = "BookingID", skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(rename = "OldBatteryID")]
    pub old_battery_id: String,
    #[serde(rename = "NewBatteryID")]
    pub new_battery_id: String,
    #[serde(rename = "StationID")]
    pub station_id: String,
    pub amount: f64,
}

impl NewSwapTransaction {
    /// Build a swap request; both battery ids must be present and different.
    pub fn new(
        booking_id: Option<String>,
        old_battery_id: impl Into<String>,
        new_battery_id: impl Into<String>,
        station_id: impl Into<String>,
        amount: f64,
    ) -> AppResult<Self> {
        let old_battery_id = old_battery_id.into();
        let new_battery_id = new_battery_id.into();
        validate_battery_pair(&old_battery_id, &new_battery_id)?;
        Ok(Self {
            booking_id,
            old_battery_id,
            new_battery_id,
            station_id: station_id.into(),
            amount,
        })
    }
}

/// Check the invariant shared by the workflow and the swap payload.
pub fn validate_battery_pair(old_battery_id: &str, new_battery_id: &str) -> AppResult<()> {
    if old_battery_id.trim().is_empty() {
        return Err(AppError::validation("oldBatteryId", "Old battery id is required"));
    }
    if new_battery_id.trim().is_empty() {
        return Err(AppError::validation("newBatteryId", "New battery id is required"));
    }
    if old_battery_id == new_battery_id {
        return Err(AppError::validation(
            "newBatteryId",
            "New battery must differ from the old battery",
        ));
    }
    Ok(())
}
