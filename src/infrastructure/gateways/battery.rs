//! HTTP implementation of BatteryGateway

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::battery::BatteryGateway;
use crate::domain::{Battery, BatterySlot, BatteryStatus, ConditionLog};
use crate::infrastructure::http::{path_segment, ApiClient};
use crate::infrastructure::mappers::{batteries_from_wire, battery_from_wire, slots_from_wire};
use crate::shared::{AppError, AppResult};

pub struct HttpBatteryGateway {
    client: Arc<ApiClient>,
}

impl HttpBatteryGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BatteryGateway for HttpBatteryGateway {
    async fn get_by_id(&self, id: &str) -> AppResult<Battery> {
        let id = path_segment("batteryId", id)?;
        let value = self
            .client
            .get_with_fallback(&format!("Battery/{}", id), &format!("Batteries/{}", id))
            .await?;
        battery_from_wire(&value)
    }

    async fn get_by_station(&self, station_id: &str) -> AppResult<Vec<Battery>> {
        let station_id = path_segment("stationId", station_id)?;
        let value = self
            .client
            .get_with_fallback(
                &format!("Battery/station/{}", station_id),
                &format!("Batteries/station/{}", station_id),
            )
            .await?;
        batteries_from_wire(&value)
    }

    async fn update_status(&self, id: &str, status: BatteryStatus) -> AppResult<Battery> {
        let id = path_segment("batteryId", id)?;
        let value = self
            .client
            .put(
                &format!("Battery/{}/status", id),
                &json!({ "Status": status.wire_status() }),
            )
            .await?;
        info!(battery_id = id, status = status.as_str(), "Battery status updated");

        if value.is_null() {
            return self.get_by_id(id).await;
        }
        battery_from_wire(&value)
    }

    async fn create_condition_log(&self, log: ConditionLog) -> AppResult<()> {
        if log.battery_id.trim().is_empty() {
            return Err(AppError::validation("batteryId", "Battery is required"));
        }
        if let Some(soh) = log.soh {
            if !(0.0..=100.0).contains(&soh) {
                return Err(AppError::validation(
                    "soh",
                    "State of health must be between 0 and 100",
                ));
            }
        }

        self.client.post("BatteryConditionLog", &log).await?;
        info!(battery_id = %log.battery_id, "Condition log recorded");
        Ok(())
    }

    async fn slots_by_station(&self, station_id: &str) -> AppResult<Vec<BatterySlot>> {
        let station_id = path_segment("stationId", station_id)?;
        let value = self
            .client
            .get_with_fallback(
                &format!("BatterySlot/station/{}", station_id),
                &format!("BatterySlots/station/{}", station_id),
            )
            .await?;
        slots_from_wire(&value)
    }
}
