//! Swap transaction gateway interface

use async_trait::async_trait;

use super::model::{NewSwapTransaction, SwapTransaction};
use crate::shared::AppResult;

#[async_trait]
pub trait SwapGateway: Send + Sync {
    async fn get_by_id(&self, id: &str) -> AppResult<SwapTransaction>;

    async fn get_by_station(&self, station_id: &str) -> AppResult<Vec<SwapTransaction>>;

    async fn create(&self, swap: NewSwapTransaction) -> AppResult<SwapTransaction>;

    /// Mark the swap done. Sends no body; `soh` is the outgoing battery's
    /// state of health and travels as the `SoH` query parameter. Transfer and
    /// slot side effects happen on the backend.
    async fn complete(&self, id: &str, soh: Option<f64>) -> AppResult<()>;

    async fn cancel(&self, id: &str) -> AppResult<()>;
}
