//! Battery gateway interface

use async_trait::async_trait;

use super::model::{Battery, BatterySlot, BatteryStatus, ConditionLog};
use crate::shared::AppResult;

#[async_trait]
pub trait BatteryGateway: Send + Sync {
    async fn get_by_id(&self, id: &str) -> AppResult<Battery>;

    async fn get_by_station(&self, station_id: &str) -> AppResult<Vec<Battery>>;

    async fn update_status(&self, id: &str, status: BatteryStatus) -> AppResult<Battery>;

    async fn create_condition_log(&self, log: ConditionLog) -> AppResult<()>;

    async fn slots_by_station(&self, station_id: &str) -> AppResult<Vec<BatterySlot>>;
}
