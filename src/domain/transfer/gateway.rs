//! Battery transfer gateway interface

use async_trait::async_trait;

use super::model::{BatteryTransfer, NewBatteryTransfer};
use crate::shared::AppResult;

#[async_trait]
pub trait TransferGateway: Send + Sync {
    async fn get_by_id(&self, id: &str) -> AppResult<BatteryTransfer>;

    async fn list(&self) -> AppResult<Vec<BatteryTransfer>>;

    async fn create(&self, transfer: NewBatteryTransfer) -> AppResult<BatteryTransfer>;

    /// `status` is in the portal vocabulary (`In-Transit`, `Completed`, ...);
    /// implementations translate it with `transfer_wire_status`.
    async fn update(&self, id: &str, status: &str) -> AppResult<BatteryTransfer>;
}
