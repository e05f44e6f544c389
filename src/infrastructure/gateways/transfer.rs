//! HTTP implementation of TransferGateway

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::transfer::{transfer_wire_status, TransferGateway};
use crate::domain::{BatteryTransfer, NewBatteryTransfer};
use crate::infrastructure::http::{path_segment, ApiClient};
use crate::infrastructure::mappers::{transfer_from_wire, transfers_from_wire};
use crate::shared::{AppError, AppResult};

pub struct HttpTransferGateway {
    client: Arc<ApiClient>,
}

impl HttpTransferGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransferGateway for HttpTransferGateway {
    async fn get_by_id(&self, id: &str) -> AppResult<BatteryTransfer> {
        let id = path_segment("transferId", id)?;
        let value = self
            .client
            .get_with_fallback(
                &format!("BatteryTransfer/{}", id),
                &format!("BatteryTransfers/{}", id),
            )
            .await?;
        transfer_from_wire(&value)
    }

    async fn list(&self) -> AppResult<Vec<BatteryTransfer>> {
        let value = self
            .client
            .get_with_fallback("BatteryTransfer", "BatteryTransfers")
            .await?;
        transfers_from_wire(&value)
    }

    async fn create(&self, transfer: NewBatteryTransfer) -> AppResult<BatteryTransfer> {
        if transfer.battery_id.trim().is_empty() {
            return Err(AppError::validation("batteryId", "Battery is required"));
        }
        if transfer.from_station_id == transfer.to_station_id {
            return Err(AppError::validation(
                "toStationId",
                "Destination must differ from the source station",
            ));
        }

        let value = self.client.post("BatteryTransfer", &transfer).await?;
        let created = transfer_from_wire(&value)?;
        info!(
            transfer_id = %created.id,
            battery_id = %transfer.battery_id,
            from = %transfer.from_station_id,
            to = %transfer.to_station_id,
            "Battery transfer requested"
        );
        Ok(created)
    }

    async fn update(&self, id: &str, status: &str) -> AppResult<BatteryTransfer> {
        let id = path_segment("transferId", id)?;
        let wire = transfer_wire_status(status);
        let value = self
            .client
            .put(&format!("BatteryTransfer/{}", id), &json!({ "Status": wire }))
            .await?;
        info!(transfer_id = id, status = wire, "Battery transfer updated");

        if value.is_null() {
            return self.get_by_id(id).await;
        }
        transfer_from_wire(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthTokens, TransferStatus};
    use crate::infrastructure::http::test_support::{client_for, spawn_backend};
    use crate::session::Session;
    use axum::extract::Path;
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    fn gateway(base: &str) -> HttpTransferGateway {
        let session = Session::in_memory().shared();
        session.save(AuthTokens::new("tok", None, 3600));
        HttpTransferGateway::new(client_for(base, session))
    }

    #[tokio::test]
    async fn update_sends_backend_status_spelling() {
        let sent = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = sent.clone();
        let router = Router::new().route(
            "/api/BatteryTransfer/{id}",
            put(move |Path(id): Path<String>, Json(body): Json<Value>| {
                let status = body["Status"].as_str().unwrap_or_default().to_string();
                sink.lock().unwrap().push(status.clone());
                async move { Json(json!({ "TransferID": id, "BatteryID": "BAT-1", "Status": status })) }
            }),
        );
        let base = spawn_backend(router).await;
        let gateway = gateway(&base);

        let t = gateway.update("T-1", "Completed").await.unwrap();
        assert_eq!(t.status, TransferStatus::Completed);
        let t = gateway.update("T-1", "In-Transit").await.unwrap();
        assert_eq!(t.status, TransferStatus::InTransit);
        gateway.update("T-1", "Pending").await.unwrap();

        assert_eq!(
            sent.lock().unwrap().as_slice(),
            ["Delivered", "InTransit", "Pending"]
        );
    }

    #[tokio::test]
    async fn list_accepts_wrapped_items() {
        let router = Router::new().route(
            "/api/BatteryTransfer",
            get(|| async {
                Json(json!({ "success": true, "data": { "items": [
                    { "TransferID": 4, "BatteryID": "BAT-1", "FromStationID": "ST-1", "ToStationID": "ST-2", "Status": "InTransit" }
                ]}}))
            }),
        );
        let base = spawn_backend(router).await;

        let list = gateway(&base).list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "4");
        assert_eq!(list[0].to_station_id.as_deref(), Some("ST-2"));
    }

    #[tokio::test]
    async fn same_station_transfer_is_rejected() {
        let err = gateway("http://127.0.0.1:9")
            .create(NewBatteryTransfer {
                battery_id: "BAT-1".into(),
                from_station_id: "ST-1".into(),
                to_station_id: "ST-1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "toStationId", .. }));
    }
}
